//! Token flags carried alongside each scanned token.

use serde::Serialize;

bitflags::bitflags! {
    /// Facts about a token that its kind alone does not capture.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct TokenFlags: u16 {
        const NONE                 = 0;
        const PRECEDING_LINE_BREAK = 1 << 0;
        const UNTERMINATED         = 1 << 1;
        const SCIENTIFIC           = 1 << 2;
        const HEX_SPECIFIER        = 1 << 3;
        const BINARY_SPECIFIER     = 1 << 4;
        const OCTAL_SPECIFIER      = 1 << 5;
        const CONTAINS_SEPARATOR   = 1 << 6;
        /// A `GenericClose` taken out of a longer `>>` or `>>>` run.
        const SPLIT_ANGLE          = 1 << 7;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}
