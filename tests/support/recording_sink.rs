use std::cell::RefCell;
use std::rc::Rc;

use translit_plugin::types::{Anchor, Suggestion};

pub type Update = (Vec<Suggestion>, Option<Anchor>);

/// Shared log of every suggestion update a plugin sends.
#[derive(Clone, Default)]
pub struct Recorder {
    updates: Rc<RefCell<Vec<Update>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink closure feeding this recorder.
    pub fn sink(&self) -> impl FnMut(&[Suggestion], Option<Anchor>) + 'static {
        let updates = Rc::clone(&self.updates);
        move |list: &[Suggestion], anchor: Option<Anchor>| {
            updates.borrow_mut().push((list.to_vec(), anchor));
        }
    }

    pub fn last(&self) -> Option<Update> {
        self.updates.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.updates.borrow().len()
    }

    pub fn clear(&self) {
        self.updates.borrow_mut().clear();
    }
}

pub fn is_cleared(update: &Update) -> bool {
    update.0.is_empty() && update.1.is_none()
}
