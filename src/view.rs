//! Manipulation of platform views on behalf of the native side.

/// Absolute frame of a view inside its parent, in pixels, anchored at the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteLayout {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Values of `View.getVisibility()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Invisible,
    Gone,
}

impl Visibility {
    pub fn from_code(code: i32) -> Self {
        match code {
            4 => Self::Invisible,
            8 => Self::Gone,
            _ => Self::Visible,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Visible => 0,
            Self::Invisible => 4,
            Self::Gone => 8,
        }
    }
}

/// Access to the platform view hierarchy.
///
/// Views may only be touched from the thread that owns them, which on
/// Android is the Java main thread. Implementations may be called from any
/// thread and are responsible for getting there.
pub trait ViewTree {
    type View;
    type Window;
    type Error;

    /// Whether `view` can hold child views.
    fn is_container(&self, view: &Self::View) -> Result<bool, Self::Error>;

    /// Append `child` to the children of the container `parent`.
    fn add_child(&self, parent: &Self::View, child: &Self::View) -> Result<(), Self::Error>;

    fn remove_child(&self, parent: &Self::View, child: &Self::View) -> Result<(), Self::Error>;

    /// The parent of `view`, if it is a view at all.
    fn parent(&self, view: &Self::View) -> Result<Option<Self::View>, Self::Error>;

    /// Replace whatever layout `view` had with an absolute one.
    fn set_layout(&self, view: &Self::View, layout: AbsoluteLayout) -> Result<(), Self::Error>;

    fn visibility(&self, view: &Self::View) -> Result<Visibility, Self::Error>;

    fn set_visibility(&self, view: &Self::View, visibility: Visibility) -> Result<(), Self::Error>;

    /// Current size of `view`, in pixels.
    fn size(&self, view: &Self::View) -> Result<(i32, i32), Self::Error>;

    /// The window of the current activity.
    fn current_window(&self) -> Result<Self::Window, Self::Error>;

    /// The container holding the app content of `window`.
    fn content_container(&self, window: &Self::Window) -> Result<Self::View, Self::Error>;

    fn child_count(&self, view: &Self::View) -> Result<i32, Self::Error>;

    fn child_at(&self, view: &Self::View, index: i32) -> Result<Option<Self::View>, Self::Error>;

    /// Position of `child` among the children of `parent`, if it is one.
    fn index_of_child(
        &self,
        parent: &Self::View,
        child: &Self::View,
    ) -> Result<Option<i32>, Self::Error>;

    /// Move `view` to the end of its parent's children, drawing it above its
    /// siblings.
    fn bring_to_front(&self, view: &Self::View) -> Result<(), Self::Error>;

    /// Draw `view` at its current size, returning its pixels row by row as
    /// packed ARGB. Empty if the view has no area.
    fn render_argb(&self, view: &Self::View) -> Result<Vec<i32>, Self::Error>;
}

/// Pixels of a view, in device pixels, 4 bytes per pixel in RGBA order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub rgba: Vec<u8>,
}

impl Snapshot {
    fn from_argb(width: i32, height: i32, argb: &[i32]) -> Self {
        let rgba = argb
            .iter()
            .flat_map(|&pixel| {
                let [a, r, g, b] = (pixel as u32).to_be_bytes();
                [r, g, b, a]
            })
            .collect();

        Self {
            width,
            height,
            rgba,
        }
    }
}

/// Places platform views. Positions and sizes are in points.
pub struct NativeView<T> {
    tree: T,
    density: f32,
}

impl<T: ViewTree> NativeView<T> {
    pub fn new(tree: T, density: f32) -> Self {
        Self { tree, density }
    }

    /// Add `child` as the last child of `parent`. Nothing happens if `parent`
    /// cannot hold children; the return value tells whether it was added.
    pub fn attach(&self, parent: &T::View, child: &T::View) -> Result<bool, T::Error> {
        if !self.tree.is_container(parent)? {
            log::trace!("parent view is not a container, skipping attach");
            return Ok(false);
        }

        self.tree.add_child(parent, child)?;
        Ok(true)
    }

    /// Give `view` an absolute frame, replacing any layout it had.
    pub fn set_bounds(
        &self,
        view: &T::View,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), T::Error> {
        self.tree.set_layout(
            view,
            AbsoluteLayout {
                left: self.to_pixels(x),
                top: self.to_pixels(y),
                width: self.to_pixels(width),
                height: self.to_pixels(height),
            },
        )
    }

    /// Detach `view` from its parent, if the parent is a container.
    pub fn remove_from_superview(&self, view: &T::View) -> Result<bool, T::Error> {
        match self.tree.parent(view)? {
            Some(parent) if self.tree.is_container(&parent)? => {
                self.tree.remove_child(&parent, view)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Reorder the children of `parent` so that `subview` is behind all of
    /// its siblings, keeping their relative order. Returns whether anything
    /// moved.
    pub fn send_subview_to_back(
        &self,
        parent: &T::View,
        subview: &T::View,
    ) -> Result<bool, T::Error> {
        if !self.tree.is_container(parent)? {
            return Ok(false);
        }

        let mut position = match self.tree.index_of_child(parent, subview)? {
            Some(index) if index > 0 => index,
            _ => return Ok(false),
        };

        // Bringing every sibling to the front, in order, leaves `subview`
        // first. `cursor` walks the children that have not moved yet.
        let count = self.tree.child_count(parent)?;
        let mut cursor = 0;
        for _ in 0..count {
            if cursor == position {
                cursor += 1;
                continue;
            }

            if let Some(sibling) = self.tree.child_at(parent, cursor)? {
                self.tree.bring_to_front(&sibling)?;
            }

            if cursor < position {
                position -= 1;
            }
        }

        Ok(true)
    }

    /// The current pixels of `view`.
    pub fn snapshot(&self, view: &T::View) -> Result<Snapshot, T::Error> {
        let (width, height) = self.tree.size(view)?;
        let argb = self.tree.render_argb(view)?;

        if argb.is_empty() {
            return Ok(Snapshot::default());
        }

        Ok(Snapshot::from_argb(width, height, &argb))
    }

    pub fn superview(&self, view: &T::View) -> Result<Option<T::View>, T::Error> {
        self.tree.parent(view)
    }

    pub fn set_hidden(&self, view: &T::View, hidden: bool) -> Result<(), T::Error> {
        let visibility = if hidden {
            Visibility::Invisible
        } else {
            Visibility::Visible
        };

        self.tree.set_visibility(view, visibility)
    }

    pub fn is_hidden(&self, view: &T::View) -> Result<bool, T::Error> {
        Ok(self.tree.visibility(view)? == Visibility::Invisible)
    }

    pub fn width(&self, view: &T::View) -> Result<f32, T::Error> {
        let (width, _) = self.tree.size(view)?;
        Ok(width as f32 / self.density)
    }

    pub fn height(&self, view: &T::View) -> Result<f32, T::Error> {
        let (_, height) = self.tree.size(view)?;
        Ok(height as f32 / self.density)
    }

    fn to_pixels(&self, points: f32) -> i32 {
        (points * self.density) as i32
    }
}
