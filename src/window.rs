use crate::view::ViewTree;

/// Access to the windows of the activity.
pub struct Window<T> {
    tree: T,
}

impl<T: ViewTree> Window<T> {
    pub fn new(tree: T) -> Self {
        Self { tree }
    }

    /// The current window of the activity.
    pub fn main_window(&self) -> Result<T::Window, T::Error> {
        self.tree.current_window()
    }

    /// The root view of the app content in `window`. This does not include
    /// the status bar.
    pub fn root_view(&self, window: &T::Window) -> Result<Option<T::View>, T::Error> {
        let content = self.tree.content_container(window)?;
        self.tree.child_at(&content, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fake::FakeTree;

    #[test]
    fn root_view_is_first_content_child() {
        let mut tree = FakeTree::default();
        tree.window = tree.add(true);
        let content = tree.window;
        let root = tree.add(true);
        let overlay = tree.add(false);
        {
            let mut nodes = tree.nodes.borrow_mut();
            nodes[content].children = vec![root, overlay];
        }

        let window = Window::new(&tree);
        let main = window.main_window().unwrap();

        assert_eq!(main, content);
        assert_eq!(window.root_view(&main), Ok(Some(root)));
    }

    #[test]
    fn empty_content_has_no_root_view() {
        let mut tree = FakeTree::default();
        tree.window = tree.add(true);

        let window = Window::new(&tree);
        let main = window.main_window().unwrap();

        assert_eq!(window.root_view(&main), Ok(None));
    }
}
