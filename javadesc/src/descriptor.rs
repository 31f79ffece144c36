use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The maximum number of array dimensions a type may have.
///
/// This is the limit the JVM imposes on array types, and also bounds the recursion depth of the decoder.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// A primitive type, identified by its single letter code in a descriptor.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Primitive {
	/// A `boolean`.
	Z,
	/// A `byte`. In rust, this is a `i8`.
	B,
	/// A `short`. In rust, this is a `i16`.
	S,
	/// An `int`. In rust, this is a `i32`.
	I,
	/// A `char`.
	C,
	/// A `long`. In rust, this is a `i64`.
	J,
	/// A `float`. In rust, this is a `f32`.
	F,
	/// A `double`. In rust, this is a `f64`.
	D,
	/// The `void` pseudo-type. Only valid as a return type.
	V,
}

impl Primitive {
	pub fn from_code(code: char) -> Option<Primitive> {
		Some(match code {
			'Z' => Primitive::Z,
			'B' => Primitive::B,
			'S' => Primitive::S,
			'I' => Primitive::I,
			'C' => Primitive::C,
			'J' => Primitive::J,
			'F' => Primitive::F,
			'D' => Primitive::D,
			'V' => Primitive::V,
			_ => return None,
		})
	}

	pub fn code(self) -> char {
		match self {
			Primitive::Z => 'Z',
			Primitive::B => 'B',
			Primitive::S => 'S',
			Primitive::I => 'I',
			Primitive::C => 'C',
			Primitive::J => 'J',
			Primitive::F => 'F',
			Primitive::D => 'D',
			Primitive::V => 'V',
		}
	}

	/// The name of the type as written in java source code.
	pub fn name(self) -> &'static str {
		match self {
			Primitive::Z => "boolean",
			Primitive::B => "byte",
			Primitive::S => "short",
			Primitive::I => "int",
			Primitive::C => "char",
			Primitive::J => "long",
			Primitive::F => "float",
			Primitive::D => "double",
			Primitive::V => "void",
		}
	}
}

/// One decoded type of a descriptor.
///
/// Array types own their component type, so a `[[I` is an array of an array of `int`:
/// ```
/// use javadesc::{Primitive, Type};
///
/// let int_array_array = Type::array_of(Type::array_of(Type::Primitive(Primitive::I)));
/// assert_eq!(int_array_array.dimensions(), 2);
/// assert_eq!(int_array_array.innermost(), &Type::Primitive(Primitive::I));
/// assert_eq!(int_array_array.to_string(), "int[][]");
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Type {
	Primitive(Primitive),
	/// An instance of the class with the given name, in the `/` separated form found in the descriptor.
	Object(String),
	/// An array with the given component type.
	Array(Box<Type>),
}

impl Type {
	pub fn array_of(element: Type) -> Type {
		Type::Array(Box::new(element))
	}

	/// Returns the type that remains after removing all array levels.
	pub fn innermost(&self) -> &Type {
		let mut t = self;
		while let Type::Array(element) = t {
			t = element;
		}
		t
	}

	/// Returns the number of array levels wrapping the [innermost][Type::innermost] type.
	pub fn dimensions(&self) -> usize {
		let mut dimensions = 0;
		let mut t = self;
		while let Type::Array(element) = t {
			dimensions += 1;
			t = element;
		}
		dimensions
	}

	pub fn is_void(&self) -> bool {
		matches!(self, Type::Primitive(Primitive::V))
	}

	/// Writes the descriptor form of this type.
	///
	/// The inverse of this function is [`decode_type`].
	pub fn write_descriptor(&self, string: &mut String) {
		match self {
			Type::Primitive(primitive) => string.push(primitive.code()),
			Type::Object(class_name) => {
				string.push('L');
				string.push_str(class_name);
				string.push(';');
			},
			Type::Array(element) => {
				string.push('[');
				element.write_descriptor(string);
			},
		}
	}

	pub fn descriptor(&self) -> String {
		let mut s = String::new();
		self.write_descriptor(&mut s);
		s
	}
}

impl Display for Type {
	/// Formats the type as in java source code, with a fully qualified class name.
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Primitive(primitive) => write!(f, "{}", primitive.name()),
			Type::Object(class_name) => write!(f, "{}", class_name.replace('/', ".")),
			Type::Array(element) => write!(f, "{element}[]"),
		}
	}
}

/// A decoded method descriptor.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MethodSignature {
	pub parameters: Vec<Type>,
	pub return_type: Type,
}

impl MethodSignature {
	/// Writes the descriptor this signature was decoded from.
	///
	/// The inverse of this function is [`decode`].
	pub fn descriptor(&self) -> String {
		let mut s = String::new();
		s.push('(');
		for parameter in &self.parameters {
			parameter.write_descriptor(&mut s);
		}
		s.push(')');
		self.return_type.write_descriptor(&mut s);
		s
	}
}

impl FromStr for MethodSignature {
	type Err = DecodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		decode(s)
	}
}

/// An error indicating that a descriptor couldn't be decoded.
///
/// The `position` is the byte offset in `descriptor` at which the problem was found.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("invalid descriptor {descriptor:?} at position {position}: {kind}")]
pub struct DecodeError {
	pub descriptor: String,
	pub position: usize,
	pub kind: DecodeErrorKind,
}

impl DecodeError {
	fn new(descriptor: &str, position: usize, kind: DecodeErrorKind) -> DecodeError {
		DecodeError { descriptor: descriptor.to_owned(), position, kind }
	}
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DecodeErrorKind {
	#[error("expected a parameter list enclosed in `(` and `)`")]
	MissingParameterList,
	#[error("expected a return type")]
	MissingReturnType,
	#[error("array marker `[` without component type")]
	DanglingArray,
	#[error("class reference without terminating `;`")]
	UnterminatedClass,
	#[error("class reference with empty name")]
	EmptyClassName,
	#[error("unknown type code {0:?}")]
	UnknownCode(char),
	#[error("`void` is only allowed as return type")]
	MisplacedVoid,
	#[error("more than {MAX_ARRAY_DIMENSIONS} array dimensions")]
	TooManyDimensions,
	#[error("no progress made while reading a type")]
	NoProgress,
	#[error("expected end of descriptor, got {0:?} remaining")]
	TrailingInput(String),
}

// The grammar for descriptors is:
//   MethodDescriptor:
//     "(" FieldType* ")" ReturnDescriptor
//
//   ReturnDescriptor:
//     FieldType | "V"
//
//   FieldType:
//     "Z" | "B" | "S" | "I" | "C" | "J" | "F" | "D" |
//     "L" ClassName ";" |
//     "[" FieldType
//
// Reads one type from `descriptor[position..end]`, returning it together with the position right after it.
fn read_type(descriptor: &str, position: usize, end: usize, depth: usize) -> Result<(Type, usize), DecodeError> {
	let error = |position, kind| DecodeError::new(descriptor, position, kind);

	let Some(code) = descriptor[position..end].chars().next() else {
		let kind = if depth > 0 { DecodeErrorKind::DanglingArray } else { DecodeErrorKind::MissingReturnType };
		return Err(error(position, kind));
	};

	match code {
		'[' => {
			if depth >= MAX_ARRAY_DIMENSIONS {
				return Err(error(position, DecodeErrorKind::TooManyDimensions));
			}

			let (element, next) = read_type(descriptor, position + 1, end, depth + 1)?;
			if element.is_void() {
				return Err(error(position + 1, DecodeErrorKind::MisplacedVoid));
			}

			Ok((Type::array_of(element), next))
		},
		'L' => {
			let start = position + 1;
			let length = descriptor[start..end].find(';')
				.ok_or_else(|| error(position, DecodeErrorKind::UnterminatedClass))?;

			if length == 0 {
				return Err(error(position, DecodeErrorKind::EmptyClassName));
			}

			let class_name = descriptor[start..start + length].to_owned();
			Ok((Type::Object(class_name), start + length + 1))
		},
		code => {
			let primitive = Primitive::from_code(code)
				.ok_or_else(|| error(position, DecodeErrorKind::UnknownCode(code)))?;

			Ok((Type::Primitive(primitive), position + code.len_utf8()))
		},
	}
}

/// Decodes a method descriptor.
///
/// The parameter list is everything between the leading `(` and the last `)`, the return type is everything after
/// that `)`.
///
/// The inverse of this function is [`MethodSignature::descriptor`].
///
/// # Examples
/// ```
/// # use pretty_assertions::assert_eq;
/// use javadesc::{MethodSignature, Primitive, Type};
///
/// assert_eq!(
///     javadesc::decode("(I[Ljava/lang/String;)V").unwrap(),
///     MethodSignature {
///         parameters: vec![
///             Type::Primitive(Primitive::I),
///             Type::array_of(Type::Object("java/lang/String".to_owned())),
///         ],
///         return_type: Type::Primitive(Primitive::V),
///     }
/// );
///
/// assert!(javadesc::decode("(Ljava/lang/String)V").is_err());
/// ```
pub fn decode(descriptor: &str) -> Result<MethodSignature, DecodeError> {
	let error = |position, kind| DecodeError::new(descriptor, position, kind);

	if !descriptor.starts_with('(') {
		return Err(error(0, DecodeErrorKind::MissingParameterList));
	}
	let close = descriptor.rfind(')')
		.ok_or_else(|| error(descriptor.len(), DecodeErrorKind::MissingParameterList))?;

	let mut parameters = Vec::new();
	let mut cursor = 1;
	while cursor < close {
		let (parameter, next) = read_type(descriptor, cursor, close, 0)?;
		if next <= cursor {
			return Err(error(cursor, DecodeErrorKind::NoProgress));
		}
		if parameter.is_void() {
			return Err(error(cursor, DecodeErrorKind::MisplacedVoid));
		}

		parameters.push(parameter);
		cursor = next;
	}

	let return_type = decode_from(descriptor, close + 1)?;

	Ok(MethodSignature { parameters, return_type })
}

/// Decodes a single type descriptor, like `I`, `V` or `[Ljava/lang/Object;`.
///
/// The inverse of this function is [`Type::descriptor`].
///
/// ```
/// use javadesc::Type;
///
/// let t = javadesc::decode_type("[[Ljava/lang/Object;").unwrap();
/// assert_eq!(t.dimensions(), 2);
/// assert_eq!(t.innermost(), &Type::Object("java/lang/Object".to_owned()));
/// ```
pub fn decode_type(descriptor: &str) -> Result<Type, DecodeError> {
	decode_from(descriptor, 0)
}

fn decode_from(descriptor: &str, position: usize) -> Result<Type, DecodeError> {
	let (t, next) = read_type(descriptor, position, descriptor.len(), 0)?;

	if next != descriptor.len() {
		let remaining = descriptor[next..].to_owned();
		return Err(DecodeError::new(descriptor, next, DecodeErrorKind::TrailingInput(remaining)));
	}

	Ok(t)
}
