//! Path templates such as `out/{z}/{x}/{y}.png`.
//!
//! A template is compiled once into literals and `{x}`, `{y}`, `{z}` placeholders. Placeholders
//! may come in any order and may repeat, as long as repeated ones capture the same number.
//! `{{` and `}}` stand for literal braces.
//!
//! ```rust
//! use tileutils_container::PathTemplate;
//! use tileutils_core::TileId;
//!
//! let template = PathTemplate::parse("tiles/{z}/{x}/{y}.bin").unwrap();
//! assert_eq!(template.render(&TileId::new(3, 5, 4).unwrap()), "tiles/4/3/5.bin");
//! assert_eq!(template.match_path("tiles/4/3/5.bin"), Some((3, 5, 4)));
//! assert_eq!(template.root(), std::path::PathBuf::from("tiles"));
//! ```

use anyhow::{Result, bail, ensure};
use std::{
	fmt,
	path::{Path, PathBuf},
};
use tileutils_core::TileId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
	X,
	Y,
	Z,
}

impl Axis {
	fn index(self) -> usize {
		match self {
			Axis::X => 0,
			Axis::Y => 1,
			Axis::Z => 2,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
	Literal(String),
	Placeholder(Axis),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTemplate {
	source: String,
	tokens: Vec<Token>,
}

impl PathTemplate {
	pub fn parse(source: &str) -> Result<PathTemplate> {
		let mut tokens: Vec<Token> = Vec::new();
		let mut literal = String::new();
		let mut chars = source.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				'{' if chars.peek() == Some(&'{') => {
					chars.next();
					literal.push('{');
				}
				'}' if chars.peek() == Some(&'}') => {
					chars.next();
					literal.push('}');
				}
				'{' => {
					let mut name = String::new();
					loop {
						match chars.next() {
							Some('}') => break,
							Some(c) => name.push(c),
							None => bail!("unterminated placeholder in template '{source}'"),
						}
					}
					let axis = match name.as_str() {
						"x" => Axis::X,
						"y" => Axis::Y,
						"z" => Axis::Z,
						_ => bail!("unknown placeholder '{{{name}}}' in template '{source}'"),
					};
					if !literal.is_empty() {
						tokens.push(Token::Literal(std::mem::take(&mut literal)));
					}
					tokens.push(Token::Placeholder(axis));
				}
				'}' => bail!("unmatched '}}' in template '{source}'"),
				c => literal.push(c),
			}
		}
		if !literal.is_empty() {
			tokens.push(Token::Literal(literal));
		}

		for (axis, name) in [(Axis::X, "{x}"), (Axis::Y, "{y}"), (Axis::Z, "{z}")] {
			ensure!(
				tokens.contains(&Token::Placeholder(axis)),
				"template '{source}' must contain {name}"
			);
		}

		Ok(PathTemplate {
			source: source.to_string(),
			tokens,
		})
	}

	/// Fills in the coordinates of `id` as they are, without any row flip.
	pub fn render(&self, id: &TileId) -> String {
		let mut path = String::new();
		for token in &self.tokens {
			match token {
				Token::Literal(text) => path.push_str(text),
				Token::Placeholder(Axis::X) => path.push_str(&id.x.to_string()),
				Token::Placeholder(Axis::Y) => path.push_str(&id.y.to_string()),
				Token::Placeholder(Axis::Z) => path.push_str(&id.z.to_string()),
			}
		}
		path
	}

	/// Deepest directory that contains every rendered path. Empty if that is the current directory.
	pub fn root(&self) -> PathBuf {
		let first = self.render(&TileId::default());
		let second = self.render(&TileId { x: 1, y: 1, z: 1 });
		let mut a = Path::new(&first);
		let mut b = Path::new(&second);
		while a != b {
			match (a.parent(), b.parent()) {
				(Some(pa), Some(pb)) => {
					a = pa;
					b = pb;
				}
				_ => return PathBuf::new(),
			}
		}
		a.to_path_buf()
	}

	/// Matches a whole path against the template and returns the captured `(x, y, z)`.
	///
	/// Captures are plain numbers; whether they form a valid tile is up to the caller.
	pub fn match_path(&self, path: &str) -> Option<(u32, u32, u32)> {
		let mut captures = [None; 3];
		if match_tokens(&self.tokens, path, &mut captures) {
			Some((captures[0]?, captures[1]?, captures[2]?))
		} else {
			None
		}
	}
}

/// Backtracking match. Placeholders take the longest digit run first and give digits back
/// when the rest of the template does not match.
fn match_tokens(tokens: &[Token], input: &str, captures: &mut [Option<u32>; 3]) -> bool {
	let Some((token, rest)) = tokens.split_first() else {
		return input.is_empty();
	};

	match token {
		Token::Literal(text) => input
			.strip_prefix(text.as_str())
			.is_some_and(|remaining| match_tokens(rest, remaining, captures)),
		Token::Placeholder(axis) => {
			let slot = axis.index();
			let digits = input.bytes().take_while(u8::is_ascii_digit).count();
			for length in (1..=digits).rev() {
				let Ok(value) = input[..length].parse::<u32>() else {
					continue;
				};
				let previous = captures[slot];
				if previous.is_some_and(|p| p != value) {
					continue;
				}
				captures[slot] = Some(value);
				if match_tokens(rest, &input[length..], captures) {
					return true;
				}
				captures[slot] = previous;
			}
			false
		}
	}
}

impl fmt::Display for PathTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source)
	}
}
