pub use self::drawing::*;

pub mod drawing;

/// Creates enums that can be picked interactively or passed on the command line
///
/// This macro generates:
/// 1. An enum with specified variants, each documented with its description
/// 2. Standard trait implementations (Debug, Copy, Clone, etc.)
/// 3. Ord/PartialOrd/Eq/PartialEq for ordering/comparison
/// 4. [`inquiry::Choice`], which provides `choice(prompt)` plus a Display
///    impl and `description()` built from the variant docs
/// 5. [`clap::ValueEnum`] so the variant can be given as a flag value
///
/// # Syntax
/// `choice!(EnumName, Variant => "Description", ...)`
///
/// # Example
/// ```ignore
/// choice!(Palette,
///     Ink => "Ink - Black lines on white paper",
///     Chalk => "Chalk - White lines on a dark board"
/// );
///
/// // From a prompt:
/// let palette = Palette::choice("Pick a palette")?;
/// // Or from the command line as `--palette chalk`.
/// ```
#[macro_export]
macro_rules! choice {
    ($enum_name:ident, $($variant:ident => $desc:expr),+) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            inquiry::Choice,
            clap::ValueEnum,
            Ord,
            PartialOrd,
            Eq,
            PartialEq,
        )]
        pub enum $enum_name {
            $(#[doc = $desc] $variant,)+
        }
    };
}
