mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `calcstep_error::ErrorKind` trait for the given struct.
///
/// The report for the error is customized with the `error` attribute:
/// ```ignore
/// use calcstep_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of file", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                   |
/// | --------- | ----------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the report.                               |
/// | `labels`  | An array of label texts, matched in order with the spans of the error.        |
/// | `help`    | Optional help text, describing what the user can do to fix the error.         |
///
/// Each tag accepts an expression. For structs with named fields, the expression is evaluated
/// with the fields of the struct in scope (tuple structs are not supported).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl calcstep_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
