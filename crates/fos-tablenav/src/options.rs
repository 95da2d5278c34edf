//! Build Configuration

/// Treatment of `rowspan="0"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroRowspan {
    /// Coerce to 1, like the common renderer quirk
    #[default]
    Quirk,
    /// Span to the end of the row group, per the markup table model
    RestOfGroup,
}

/// Grid build options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// How `rowspan="0"` is resolved
    pub zero_rowspan: ZeroRowspan,

    /// Upper clamp for effective colspans
    pub max_colspan: usize,

    /// Upper clamp for effective rowspans
    pub max_rowspan: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            zero_rowspan: ZeroRowspan::Quirk,
            max_colspan: 1000,
            max_rowspan: 65534,
        }
    }
}

impl BuildOptions {
    /// Options following the markup table model instead of the quirk
    pub fn strict() -> Self {
        Self {
            zero_rowspan: ZeroRowspan::RestOfGroup,
            ..Default::default()
        }
    }
}
