use proc_macro2::TokenStream as TokenStream2;
use syn::Token;
use syn::parse::{self, Parse, ParseStream};

/// Arguments of `#[context(...)]`: an optional leading `move,` followed by `format!` arguments.
#[derive(Debug)]
pub struct Args(pub Option<Token![move]>, pub TokenStream2);

impl Parse for Args {
	fn parse(input: ParseStream<'_>) -> parse::Result<Self> {
		let move_token = if input.peek(Token![move]) {
			let token = input.parse()?;
			input.parse::<Token![,]>()?;
			Some(token)
		} else {
			None
		};
		Ok(Self(move_token, input.parse()?))
	}
}

#[cfg(test)]
mod tests {
	use super::{Args, TokenStream2};
	use pretty_assertions::assert_eq;
	use syn::parse_str;

	fn tokens(text: &str) -> String {
		parse_str::<TokenStream2>(text).unwrap().to_string()
	}

	#[test]
	fn plain_format_string() {
		let args: Args = parse_str(r#""opening '{}'", path.display()"#).unwrap();
		assert!(args.0.is_none());
		assert_eq!(args.1.to_string(), tokens(r#""opening '{}'", path.display()"#));
	}

	#[test]
	fn leading_move() {
		let args: Args = parse_str(r#"move, "writing {}", name"#).unwrap();
		assert!(args.0.is_some());
		assert_eq!(args.1.to_string(), tokens(r#""writing {}", name"#));
	}

	#[test]
	fn move_without_comma_is_rejected() {
		let err = parse_str::<Args>("move foo").unwrap_err();
		assert!(err.to_string().contains(','), "unexpected error: {err}");
	}
}
