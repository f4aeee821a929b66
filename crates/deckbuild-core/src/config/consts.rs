//! Built-in recipe constants

/// Project config file looked up at the root
pub const CONFIG_FILE: &str = "deckbuild.toml";

/// Mode applied to the built script (rwxr-xr-x)
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Suffix of the staging file created next to the destination
pub const STAGING_SUFFIX: &str = ".new";

pub mod make_deck {
    pub const RECIPE: &str = "make-deck";
    pub const PPTX_RECIPE: &str = "make-deck-pptx";

    pub const TEMPLATE: &str = "make_deck.template.sh";
    pub const DESTINATION: &str = "make_deck";

    pub const LATEX_PLACEHOLDER: &str = "__MERGED_TEMPLATE_CONTENT__";
    pub const LATEX_SOURCE: &str = "pandoc/templates/merged_template.latex";

    pub const PPTX_PLACEHOLDER: &str = "__PPTX_POSTPROCESS_CONTENT__";
    pub const PPTX_SOURCE: &str = "pandoc/scripts/pptx_postprocess.py";
}
