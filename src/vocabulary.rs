use std::fmt;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    ///
    /// # Example
    /// ```
    /// use visionscript::vocabulary::Arity;
    ///
    /// assert!(Arity::OneOf(&[0, 1]).check(1));
    /// assert!(!Arity::Exact(2).check(1));
    /// assert!(Arity::AtLeast(0).check(7));
    /// ```
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(arr) => {
                let counts = arr.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}", counts.join(" or "))
            },
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Defines the builtin operations by generating the `Builtin` enum and its
/// metadata accessors.
///
/// Each entry provides:
/// - the variant name,
/// - the display spelling used in scripts and messages,
/// - the canonical lower-case name recorded in the session history,
/// - an arity specification,
/// - a one-line usage string shown by `Help`.
///
/// The macro produces:
/// - `Builtin` (closed set of operations),
/// - `Builtin::ALL` (table order, which is also suggestion order),
/// - `display_name`, `canonical_name`, `arity` and `usage`.
macro_rules! builtin_functions {
    (
        $(
            $variant:ident => {
                display: $display:literal,
                canonical: $canonical:literal,
                arity: $arity:expr,
                usage: $usage:literal $(,)?
            }
        ),* $(,)?
    ) => {
        /// A builtin operation. Every call that survives alias resolution
        /// names exactly one of these.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Builtin {
            $(
                #[doc = $usage]
                $variant,
            )*
        }

        impl Builtin {
            /// Every builtin, in table order.
            pub const ALL: &'static [Self] = &[
                $(Self::$variant,)*
            ];

            /// The spelling used in scripts, such as `GetColours`.
            #[must_use]
            pub const fn display_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $display,)*
                }
            }

            /// The lower-case name recorded in the session history.
            #[must_use]
            pub const fn canonical_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $canonical,)*
                }
            }

            /// How many arguments the builtin accepts.
            #[must_use]
            pub const fn arity(self) -> Arity {
                match self {
                    $(Self::$variant => $arity,)*
                }
            }

            /// One-line usage text shown by `Help`.
            #[must_use]
            pub const fn usage(self) -> &'static str {
                match self {
                    $(Self::$variant => $usage,)*
                }
            }
        }
    };
}

builtin_functions! {
    Load          => { display: "Load",          canonical: "load",          arity: Arity::OneOf(&[0, 1]), usage: "Load[\"path\"]: load an image, or every image in a folder, onto the image stack." },
    Save          => { display: "Save",          canonical: "save",          arity: Arity::Exact(1),       usage: "Save[\"path\"]: save the most recent image to a file." },
    Classify      => { display: "Classify",      canonical: "classify",      arity: Arity::AtLeast(1),     usage: "Classify[\"label\", ...]: pick the label that best describes the most recent image." },
    Size          => { display: "Size",          canonical: "size",          arity: Arity::Exact(0),       usage: "Size[]: get the width and height of the most recent image." },
    Say           => { display: "Say",           canonical: "say",           arity: Arity::OneOf(&[0, 1]), usage: "Say[value]: print a value, or the last result when no value is given." },
    Detect        => { display: "Detect",        canonical: "detect",        arity: Arity::AtLeast(0),     usage: "Detect[\"class\", ...]: find objects in the most recent image." },
    Segment       => { display: "Segment",       canonical: "segment",       arity: Arity::Exact(1),       usage: "Segment[\"prompt\"]: segment objects matching a text prompt." },
    Cutout        => { display: "Cutout",        canonical: "cutout",        arity: Arity::Exact(0),       usage: "Cutout[]: crop the first detection out of the most recent image." },
    Count         => { display: "Count",         canonical: "count",         arity: Arity::OneOf(&[0, 1]), usage: "Count[\"class\"]: count detections, optionally of one class." },
    CountInRegion => { display: "CountInRegion", canonical: "countinregion", arity: Arity::Exact(4),       usage: "CountInRegion[x1, y1, x2, y2]: count detections inside a region." },
    Replace       => { display: "Replace",       canonical: "replace",       arity: Arity::Exact(1),       usage: "Replace[\"colour\"]: fill every detection with a colour." },
    Show          => { display: "Show",          canonical: "show",          arity: Arity::Exact(0),       usage: "Show[]: display the most recent image with its annotations." },
    Exit          => { display: "Exit",          canonical: "exit",          arity: Arity::Exact(0),       usage: "Exit[]: stop the script." },
    Help          => { display: "Help",          canonical: "help",          arity: Arity::Exact(1),       usage: "Help[\"Name\"]: show usage for an operation." },
    Train         => { display: "Train",         canonical: "train",         arity: Arity::OneOf(&[1, 2]), usage: "Train[\"folder\", \"model\"]: train a model on a labelled folder." },
    Compare       => { display: "Compare",       canonical: "compare",       arity: Arity::Exact(0),       usage: "Compare[]: show every loaded image side by side." },
    Read          => { display: "Read",          canonical: "read",          arity: Arity::Exact(0),       usage: "Read[]: render the last result as text." },
    Label         => { display: "Label",         canonical: "label",         arity: Arity::Exact(2),       usage: "Label[\"folder\", [\"class\", ...]]: label a folder of images." },
    Get           => { display: "Get",           canonical: "get",           arity: Arity::Exact(1),       usage: "Get[index]: take one item from the last result." },
    Use           => { display: "Use",           canonical: "use",           arity: Arity::Exact(1),       usage: "Use[\"model\"]: choose the model used by Detect." },
    Caption       => { display: "Caption",       canonical: "caption",       arity: Arity::Exact(0),       usage: "Caption[]: describe the most recent image in words." },
    Import        => { display: "Import",        canonical: "import",        arity: Arity::Exact(1),       usage: "Import[\"name\"]: run name.vic in the current session." },
    Rotate        => { display: "Rotate",        canonical: "rotate",        arity: Arity::Exact(1),       usage: "Rotate[degrees]: rotate the most recent image." },
    GetColours    => { display: "GetColours",    canonical: "getcolours",    arity: Arity::OneOf(&[0, 1]), usage: "GetColours[k]: name the k most common colours in the most recent image." },
    GetText       => { display: "GetText",       canonical: "gettext",       arity: Arity::Exact(0),       usage: "GetText[]: read the text in the most recent image." },
    Greyscale     => { display: "Greyscale",     canonical: "greyscale",     arity: Arity::Exact(0),       usage: "Greyscale[]: convert the most recent image to greyscale." },
    Select        => { display: "Select",        canonical: "select",        arity: Arity::OneOf(&[0, 1]), usage: "Select[index]: keep confident detections, optionally only one." },
    Paste         => { display: "Paste",         canonical: "paste",         arity: Arity::Exact(2),       usage: "Paste[x, y]: paste the top image onto the one below it." },
    PasteRandom   => { display: "PasteRandom",   canonical: "pasterandom",   arity: Arity::Exact(0),       usage: "PasteRandom[]: paste the top image at a random free spot of the one below it." },
    Resize        => { display: "Resize",        canonical: "resize",        arity: Arity::Exact(2),       usage: "Resize[width, height]: resize the most recent image." },
    Blur          => { display: "Blur",          canonical: "blur",          arity: Arity::Exact(1),       usage: "Blur[radius]: blur the most recent image." },
    SetBrightness => { display: "SetBrightness", canonical: "setbrightness", arity: Arity::Exact(1),       usage: "SetBrightness[amount]: change the brightness of the most recent image." },
    Search        => { display: "Search",        canonical: "search",        arity: Arity::Exact(1),       usage: "Search[\"query\"]: find the loaded images closest to a query." },
    Similarity    => { display: "Similarity",    canonical: "similarity",    arity: Arity::OneOf(&[0, 1]), usage: "Similarity[n]: compare the last n images (default 2)." },
    ReadQR        => { display: "ReadQR",        canonical: "readqr",        arity: Arity::Exact(0),       usage: "ReadQR[]: decode a QR code in the most recent image." },
    Reset         => { display: "Reset",         canonical: "reset",         arity: Arity::Exact(0),       usage: "Reset[]: clear all session state." },
    GetEdges      => { display: "GetEdges",      canonical: "getedges",      arity: Arity::Exact(0),       usage: "GetEdges[]: detect edges in the most recent image." },
    SetConfidence => { display: "SetConfidence", canonical: "setconfidence", arity: Arity::Exact(1),       usage: "SetConfidence[percent]: set the detection confidence threshold." },
}

/// Structural keywords. These are parsed into dedicated nodes instead of
/// calls, and are never dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Make,
    Run,
    If,
    In,
    Not,
    Contains,
    Input,
}

impl Keyword {
    /// Every keyword, in table order.
    pub const ALL: &'static [Self] =
        &[Self::Make, Self::Run, Self::If, Self::In, Self::Not, Self::Contains, Self::Input];

    /// The spelling used in scripts.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Run => "Run",
            Self::If => "If",
            Self::In => "In",
            Self::Not => "Not",
            Self::Contains => "Contains",
            Self::Input => "Input",
        }
    }

    /// One-line usage text shown by `Help`.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Make => "Make[Name]: define a function; the indented lines below form its body.",
            Self::Run => "Run[Name]: run a function defined with Make.",
            Self::If => "If[condition]: continue only while the condition holds.",
            Self::In => "In[\"folder\", file]: run the indented lines once for every file in a folder.",
            Self::Not => "Not[value]: negate a boolean.",
            Self::Contains => "Contains[\"text\"]: check whether the last result contains the text.",
            Self::Input => "Input[\"name\"]: read a value supplied by the host.",
        }
    }
}

/// Alternate spellings and the builtin each one stands for.
pub const ALIASES: &[(&str, Builtin)] = &[("IsItA", Builtin::Classify),
                                          ("Find", Builtin::Detect),
                                          ("Describe", Builtin::Caption),
                                          ("GetColors", Builtin::GetColours)];

/// A vocabulary entry after alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Builtin(Builtin),
    Keyword(Keyword),
}

/// Looks up a name in the vocabulary.
///
/// Matching is case-insensitive. Aliases resolve to the builtin they stand
/// for, so callers only ever see canonical operations.
///
/// # Example
/// ```
/// use visionscript::vocabulary::{Builtin, Keyword, Word, lookup};
///
/// assert_eq!(lookup("find"), Some(Word::Builtin(Builtin::Detect)));
/// assert_eq!(lookup("MAKE"), Some(Word::Keyword(Keyword::Make)));
/// assert_eq!(lookup("Greet"), None);
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<Word> {
    if let Some(builtin) = resolve_builtin(name) {
        return Some(Word::Builtin(builtin));
    }

    Keyword::ALL.iter()
                .find(|k| k.display_name().eq_ignore_ascii_case(name))
                .map(|k| Word::Keyword(*k))
}

/// Resolves a surface name, alias or canonical, to its builtin.
#[must_use]
pub fn resolve_builtin(name: &str) -> Option<Builtin> {
    Builtin::ALL.iter()
                .copied()
                .find(|b| b.canonical_name().eq_ignore_ascii_case(name))
                .or_else(|| {
                    ALIASES.iter()
                           .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
                           .map(|(_, builtin)| *builtin)
                })
}

/// Returns whether a name is reserved by the vocabulary.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    lookup(name).is_some()
}

/// Iterates over the display spelling of every vocabulary entry.
///
/// The order is fixed: builtins in table order, then keywords, then aliases.
/// Suggestions are reported in this order.
pub fn entries() -> impl Iterator<Item = &'static str> {
    Builtin::ALL.iter()
                .map(|b| b.display_name())
                .chain(Keyword::ALL.iter().map(|k| k.display_name()))
                .chain(ALIASES.iter().map(|(alias, _)| *alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_are_lowercase_display_names() {
        for builtin in Builtin::ALL {
            assert_eq!(builtin.canonical_name(),
                       builtin.display_name().to_ascii_lowercase());
        }
    }

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(resolve_builtin("ISITA"), Some(Builtin::Classify));
        assert_eq!(resolve_builtin("describe"), Some(Builtin::Caption));
        assert_eq!(resolve_builtin("GetColors"), Some(Builtin::GetColours));
        assert_eq!(resolve_builtin("Find"), Some(Builtin::Detect));
    }

    #[test]
    fn keywords_are_not_builtins() {
        assert_eq!(resolve_builtin("If"), None);
        assert_eq!(lookup("if"), Some(Word::Keyword(Keyword::If)));
    }

    #[test]
    fn entries_list_builtins_before_keywords_and_aliases() {
        let all = entries().collect::<Vec<_>>();
        let say = all.iter().position(|e| *e == "Say");
        let make = all.iter().position(|e| *e == "Make");
        let find = all.iter().position(|e| *e == "Find");

        assert!(say < make);
        assert!(make < find);
        assert_eq!(all.len(), Builtin::ALL.len() + Keyword::ALL.len() + ALIASES.len());
    }

    #[test]
    fn arity_display() {
        assert_eq!(Arity::Exact(2).to_string(), "2");
        assert_eq!(Arity::OneOf(&[0, 1]).to_string(), "0 or 1");
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1");
    }
}
