//! Supported Currency Table with Macro-Based Code Generation
//!
//! The converter core treats currency codes as opaque strings. This crate is
//! the single place where the set of codes accepted by the console menu and
//! the HTTP API is declared. Currencies are listed declaratively and a macro
//! generates the `CurrencyCode` enum together with its lookup helpers.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     SEK => ("SEK", "kr", "Swedish krona"),
//! }
//! ```
//!
//! # Example
//! ```
//! use currencies::CurrencyCode;
//!
//! let brl: CurrencyCode = " brl ".parse().unwrap();
//! assert_eq!(brl, CurrencyCode::BRL);
//! assert_eq!(brl.symbol(), "R$");
//! assert!(currencies::is_valid("usd"));
//! assert!(!currencies::is_valid("XYZ"));
//! ```

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Parse Error
// ─────────────────────────────────────────────────────────────────────────────

/// Returned when a string does not name a supported currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.trim().is_empty() {
            write!(f, "Currency code cannot be empty")
        } else {
            write!(f, "Unknown currency: {}", self.0)
        }
    }
}

impl std::error::Error for UnknownCurrency {}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookup tables
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currencies with an auto-generated enum and lookups.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "SYMBOL", "description"),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $description:literal)
        ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $description),*
                }
            }

            /// Every supported currency, in declaration order.
            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }

            /// Every supported code as a plain string.
            pub fn codes() -> Vec<&'static str> {
                vec![$($code),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::UnknownCurrency;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err($crate::UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    // South America
    ARS => ("ARS", "$", "Argentine peso"),
    BOB => ("BOB", "Bs", "Bolivian boliviano"),
    BRL => ("BRL", "R$", "Brazilian real"),
    CLP => ("CLP", "$", "Chilean peso"),
    COP => ("COP", "$", "Colombian peso"),
    PEN => ("PEN", "S/", "Peruvian sol"),
    UYU => ("UYU", "$U", "Uruguayan peso"),
    PYG => ("PYG", "₲", "Paraguayan guarani"),

    // North America
    USD => ("USD", "$", "US dollar"),
    CAD => ("CAD", "$", "Canadian dollar"),
    MXN => ("MXN", "$", "Mexican peso"),

    // Europe
    EUR => ("EUR", "€", "Euro"),
    GBP => ("GBP", "£", "Pound sterling"),
    CHF => ("CHF", "Fr", "Swiss franc"),

    // Asia
    JPY => ("JPY", "¥", "Japanese yen"),
    CNY => ("CNY", "¥", "Chinese yuan"),
    INR => ("INR", "₹", "Indian rupee"),
    KRW => ("KRW", "₩", "South Korean won"),

    // Oceania
    AUD => ("AUD", "$", "Australian dollar"),
    NZD => ("NZD", "$", "New Zealand dollar"),
}

/// Returns true if `code` names a supported currency (case-insensitive).
pub fn is_valid(code: &str) -> bool {
    code.parse::<CurrencyCode>().is_ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
