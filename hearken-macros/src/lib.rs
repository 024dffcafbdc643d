//! Procedural macros for Hearken.
//!
//! Enabled through the `macros` feature of the `hearken` crate; the generated
//! code refers to items through `::hearken`.

use proc_macro::TokenStream;

mod event;
mod listener;

/// Derive macro for implementing the `Event` trait.
///
/// ```rust,ignore
/// #[derive(hearken::Event)]
/// struct Simple {
///     value: i32,
/// }
/// ```
#[proc_macro_derive(Event)]
pub fn derive_event(input: TokenStream) -> TokenStream {
    event::derive_event_impl(input)
}

/// Turns a function into a `Listener` unit struct.
///
/// The function must take exactly one `&mut Event` argument and return
/// nothing. The generated struct takes the function's name unless
/// `name = "..."` is given.
///
/// ```rust,ignore
/// #[hearken::listener]
/// fn reset(event: &mut Simple) {
///     event.value = 0;
/// }
///
/// dispatcher.on(reset);
/// ```
#[proc_macro_attribute]
pub fn listener(attr: TokenStream, item: TokenStream) -> TokenStream {
    listener::listener_impl(attr, item)
}
