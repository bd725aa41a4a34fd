//! Swap modifiers for `HX-Reswap`.
//!
//! Tokens are parsed permissively: anything that is not a recognised style,
//! timing or scrolling modifier is kept verbatim as [`SwapModifier::Raw`].

use std::collections::HashSet;
use std::fmt;

/// Base swap strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapStyle {
    InnerHtml,
    OuterHtml,
    BeforeBegin,
    AfterBegin,
    BeforeEnd,
    AfterEnd,
    Delete,
    None,
}

impl SwapStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStyle::InnerHtml => "innerHTML",
            SwapStyle::OuterHtml => "outerHTML",
            SwapStyle::BeforeBegin => "beforebegin",
            SwapStyle::AfterBegin => "afterbegin",
            SwapStyle::BeforeEnd => "beforeend",
            SwapStyle::AfterEnd => "afterend",
            SwapStyle::Delete => "delete",
            SwapStyle::None => "none",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "innerHTML" => SwapStyle::InnerHtml,
            "outerHTML" => SwapStyle::OuterHtml,
            "beforebegin" => SwapStyle::BeforeBegin,
            "afterbegin" => SwapStyle::AfterBegin,
            "beforeend" => SwapStyle::BeforeEnd,
            "afterend" => SwapStyle::AfterEnd,
            "delete" => SwapStyle::Delete,
            "none" => SwapStyle::None,
            _ => return None,
        })
    }
}

/// Phase a timing modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapPhase {
    Swap,
    Settle,
}

/// Delay of a timing modifier, in the unit it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delay {
    Millis(u64),
    Secs(u64),
    Mins(u64),
}

impl Delay {
    fn parse(value: &str) -> Option<Self> {
        // `ms` must be tried before `s`.
        let (digits, ctor): (&str, fn(u64) -> Delay) = if let Some(d) = value.strip_suffix("ms") {
            (d, Delay::Millis)
        } else if let Some(d) = value.strip_suffix('s') {
            (d, Delay::Secs)
        } else if let Some(d) = value.strip_suffix('m') {
            (d, Delay::Mins)
        } else {
            return None;
        };

        let n: u64 = digits.parse().ok()?;
        // Reject forms like `+1s` or `01s` that would not render back verbatim.
        (n.to_string() == digits).then(|| ctor(n))
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delay::Millis(n) => write!(f, "{n}ms"),
            Delay::Secs(n) => write!(f, "{n}s"),
            Delay::Mins(n) => write!(f, "{n}m"),
        }
    }
}

/// One token of an `HX-Reswap` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwapModifier {
    Style(SwapStyle),
    Timing { phase: SwapPhase, delay: Delay },
    /// `scroll:<top|bottom|selector:...>`
    Scroll(String),
    /// `show:<top|bottom|selector:...>`
    Show(String),
    FocusScroll(bool),
    /// Unrecognised token, passed through unchanged.
    Raw(String),
}

impl SwapModifier {
    pub fn parse(token: &str) -> Self {
        if let Some(style) = SwapStyle::parse(token) {
            return SwapModifier::Style(style);
        }

        let Some((key, value)) = token.split_once(':') else {
            return SwapModifier::Raw(token.to_owned());
        };

        let parsed = match key {
            "swap" => Delay::parse(value).map(|delay| SwapModifier::Timing {
                phase: SwapPhase::Swap,
                delay,
            }),
            "settle" => Delay::parse(value).map(|delay| SwapModifier::Timing {
                phase: SwapPhase::Settle,
                delay,
            }),
            "scroll" if !value.is_empty() => Some(SwapModifier::Scroll(value.to_owned())),
            "show" if !value.is_empty() => Some(SwapModifier::Show(value.to_owned())),
            "focus-scroll" => match value {
                "true" => Some(SwapModifier::FocusScroll(true)),
                "false" => Some(SwapModifier::FocusScroll(false)),
                _ => None,
            },
            _ => None,
        };

        parsed.unwrap_or_else(|| SwapModifier::Raw(token.to_owned()))
    }
}

impl fmt::Display for SwapModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapModifier::Style(style) => f.write_str(style.as_str()),
            SwapModifier::Timing { phase, delay } => {
                let phase = match phase {
                    SwapPhase::Swap => "swap",
                    SwapPhase::Settle => "settle",
                };
                write!(f, "{phase}:{delay}")
            }
            SwapModifier::Scroll(value) => write!(f, "scroll:{value}"),
            SwapModifier::Show(value) => write!(f, "show:{value}"),
            SwapModifier::FocusScroll(value) => write!(f, "focus-scroll:{value}"),
            SwapModifier::Raw(token) => f.write_str(token),
        }
    }
}

impl From<&str> for SwapModifier {
    fn from(token: &str) -> Self {
        SwapModifier::parse(token)
    }
}

impl From<String> for SwapModifier {
    fn from(token: String) -> Self {
        SwapModifier::parse(&token)
    }
}

impl From<SwapStyle> for SwapModifier {
    fn from(style: SwapStyle) -> Self {
        SwapModifier::Style(style)
    }
}

/// Render modifiers as one header value.
///
/// Duplicates are dropped keeping the first occurrence; tokens are joined by
/// single spaces.
pub fn join_modifiers<I, M>(modifiers: I) -> String
where
    I: IntoIterator<Item = M>,
    M: Into<SwapModifier>,
{
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    for modifier in modifiers {
        let token = modifier.into().to_string();
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_styles() {
        assert_eq!(
            SwapModifier::parse("innerHTML"),
            SwapModifier::Style(SwapStyle::InnerHtml)
        );
        assert_eq!(
            SwapModifier::parse("beforeend"),
            SwapModifier::Style(SwapStyle::BeforeEnd)
        );
        // Style keywords are case-sensitive.
        assert_eq!(
            SwapModifier::parse("innerhtml"),
            SwapModifier::Raw("innerhtml".into())
        );
    }

    #[test]
    fn test_parse_timing() {
        assert_eq!(
            SwapModifier::parse("swap:1s"),
            SwapModifier::Timing {
                phase: SwapPhase::Swap,
                delay: Delay::Secs(1)
            }
        );
        assert_eq!(
            SwapModifier::parse("settle:250ms"),
            SwapModifier::Timing {
                phase: SwapPhase::Settle,
                delay: Delay::Millis(250)
            }
        );
        assert_eq!(
            SwapModifier::parse("swap:2m"),
            SwapModifier::Timing {
                phase: SwapPhase::Swap,
                delay: Delay::Mins(2)
            }
        );
        assert_eq!(
            SwapModifier::parse("swap:1.5s"),
            SwapModifier::Raw("swap:1.5s".into())
        );
        assert_eq!(
            SwapModifier::parse("settle:01s"),
            SwapModifier::Raw("settle:01s".into())
        );
    }

    #[test]
    fn test_parse_scrolling() {
        assert_eq!(
            SwapModifier::parse("scroll:top"),
            SwapModifier::Scroll("top".into())
        );
        assert_eq!(
            SwapModifier::parse("show:#list:bottom"),
            SwapModifier::Show("#list:bottom".into())
        );
        assert_eq!(
            SwapModifier::parse("focus-scroll:true"),
            SwapModifier::FocusScroll(true)
        );
        assert_eq!(
            SwapModifier::parse("focus-scroll:maybe"),
            SwapModifier::Raw("focus-scroll:maybe".into())
        );
    }

    #[test]
    fn test_display_reproduces_token() {
        for token in [
            "outerHTML",
            "swap:100ms",
            "settle:3s",
            "scroll:bottom",
            "show:window:top",
            "focus-scroll:false",
            "transition:true",
            "ignoreTitle:true",
        ] {
            assert_eq!(SwapModifier::parse(token).to_string(), token);
        }
    }

    #[test]
    fn test_join_preserves_order_and_dedupes() {
        assert_eq!(
            join_modifiers(["innerHTML", "scroll:top", "swap:1s"]),
            "innerHTML scroll:top swap:1s"
        );
        assert_eq!(
            join_modifiers(["innerHTML", "swap:1s", "innerHTML", "swap:1s", "settle:1s"]),
            "innerHTML swap:1s settle:1s"
        );
    }

    #[test]
    fn test_join_mixed_inputs() {
        let modifiers = vec![
            SwapModifier::from(SwapStyle::OuterHtml),
            SwapModifier::Timing {
                phase: SwapPhase::Settle,
                delay: Delay::Millis(20),
            },
            SwapModifier::parse("outerHTML"),
        ];
        assert_eq!(join_modifiers(modifiers), "outerHTML settle:20ms");
    }
}
