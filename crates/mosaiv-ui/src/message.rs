#[derive(Debug, Clone)]
pub enum Message {
    /// Open the native file picker.
    OpenFileDialog,
    /// Picker result: filename and raw bytes, or `None` when cancelled.
    FilePicked(Option<(String, Vec<u8>)>),

    /// Slider moved.
    CellCountChanged(u32),
    /// Toggle between entropy-seeded and reproducible mosaics.
    RandomSeedsToggled(bool),
    /// Run the mosaic and show the result.
    ApplyMosaic,
    /// Show the untransformed source again.
    ShowSource,

    /// Drop the loaded image and its preview.
    ClearImage,
    Exit,
}
