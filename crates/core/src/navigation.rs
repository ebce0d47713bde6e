//! Navigation seam and the console's fixed entry points

use std::rc::Rc;

/// Login entry point. Guarded views redirect here.
pub const LOGIN_PATH: &str = "/";

/// Application root, target of the hard redirect after a server rejection
pub const APP_ROOT: &str = "/";

/// Where an operator lands after logging in
pub const DEFAULT_PROTECTED_PATH: &str = "/raids";

/// Router operations the session core needs
pub trait Navigator {
    /// In-app route transition replacing the current history entry
    fn replace(&self, path: &str);

    /// Full reload-style navigation. Tears down all in-memory state.
    fn hard_redirect(&self, url: &str);
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn replace(&self, path: &str) {
        (**self).replace(path);
    }

    fn hard_redirect(&self, url: &str) {
        (**self).hard_redirect(url);
    }
}
