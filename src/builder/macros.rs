//! Macros for declaring event constants.

/// Declare a unit struct whose associated constants are [`Event`]s named
/// after the constants themselves.
///
/// [`Event`]: crate::core::Event
///
/// # Example
///
/// ```
/// use statecraft::events;
///
/// events! {
///     pub struct ConnectionEvents {
///         CONNECT,
///         DISCONNECT,
///         ERROR,
///     }
/// }
///
/// assert_eq!(ConnectionEvents::CONNECT.name(), "CONNECT");
/// assert_eq!(ConnectionEvents::all().len(), 3);
/// ```
#[macro_export]
macro_rules! events {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$event_meta:meta])*
                $event:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        $vis struct $name;

        impl $name {
            $(
                $(#[$event_meta])*
                pub const $event: $crate::core::Event =
                    $crate::core::Event::from_static(stringify!($event));
            )*

            /// Every event declared on this type, in declaration order.
            pub fn all() -> ::std::vec::Vec<$crate::core::Event> {
                ::std::vec![$(Self::$event),*]
            }
        }
    };
}
