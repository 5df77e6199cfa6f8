//! Procedural macros shared by the tileutils crates.
//!
//! `#[context("...")]` wraps the body of a function returning `anyhow::Result` so that any error
//! leaving the function gets the formatted message attached as context:
//!
//! ```ignore
//! #[context("opening archive '{}'", path.display())]
//! fn open(path: &Path) -> Result<ArchiveReader> { ... }
//! ```

mod args;

use crate::args::Args;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::parse_macro_input;

#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let Args(move_token, format_args) = parse_macro_input!(args);
	let mut input = parse_macro_input!(input as syn::ItemFn);

	if input.sig.asyncness.is_some() {
		return syn::Error::new_spanned(input.sig.fn_token, "#[context] only supports synchronous functions")
			.to_compile_error()
			.into();
	}

	let return_type = match &input.sig.output {
		syn::ReturnType::Default => {
			return syn::Error::new_spanned(input.sig.ident, "function should return Result")
				.to_compile_error()
				.into();
		}
		output @ syn::ReturnType::Type(..) => output.clone(),
	};

	let body = &input.block;
	let err = Ident::new("err", Span::mixed_site());
	let force_fn_once = Ident::new("force_fn_once", Span::mixed_site());

	let new_body = quote! {
		// Moving a non-`Copy` value into the closure makes borrowck treat it as `FnOnce`.
		let #force_fn_once = ::core::iter::empty::<()>();
		(#move_token || #return_type {
			::core::mem::drop(#force_fn_once);
			#body
		})().map_err(|#err| #err.context(format!(#format_args)).into())
	};
	input.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(new_body), None)];

	input.into_token_stream().into()
}
