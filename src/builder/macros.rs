//! Macros for ergonomic state declarations.

/// Generate a host state enum implementing [`State`](crate::core::State).
///
/// Each variant's state id is derived from its name.
///
/// # Example
///
/// ```
/// use gatekeep::core::{State, StateId};
/// use gatekeep::state_enum;
///
/// state_enum! {
///     pub enum Crowdsale {
///         Funding,
///         Succeeded,
///         Refunding,
///     }
/// }
///
/// assert_eq!(Crowdsale::Funding.name(), "Funding");
/// assert_eq!(Crowdsale::Refunding.state_id(), StateId::from_name("Refunding"));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl From<$name> for $crate::core::StateId {
            fn from(state: $name) -> Self {
                $crate::core::State::state_id(&state)
            }
        }
    };
}
