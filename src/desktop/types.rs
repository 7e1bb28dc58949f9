/// A live top-level window. Valid only for the enumeration pass that
/// produced it — handles and titles both go stale, so verification steps
/// always re-enumerate rather than reusing an old ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRef {
    pub title: String,
    /// OS-specific stable identifier (HWND on Windows). More reliable than
    /// the title, which can repeat across windows; absent on backends that
    /// cannot provide one.
    pub handle: Option<isize>,
    pub visible: bool,
    pub minimized: bool,
    pub width: u32,
    pub height: u32,
}

impl WindowRef {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            handle: None,
            visible: true,
            minimized: false,
            width: 800,
            height: 600,
        }
    }

    pub fn with_handle(mut self, handle: isize) -> Self {
        self.handle = Some(handle);
        self
    }
}
