//! Mobile navigation menu.

/// Class that marks `.nav-links` as expanded.
pub const NAV_OPEN_CLASS: &str = "active";

pub trait NavView {
    fn is_open(&self) -> bool;
    fn set_open(&self, open: bool);
}

pub struct NavMenu<V> {
    view: V,
}

impl<V: NavView> NavMenu<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Menu button.
    pub fn toggle(&self) {
        self.view.set_open(!self.view.is_open());
    }

    /// Any link inside the menu.
    pub fn link_clicked(&self) {
        self.view.set_open(false);
    }
}
