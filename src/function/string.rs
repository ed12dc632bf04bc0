use super::Arguments;
use crate::{
    encode,
    log::{error_argument, Error},
    render::is_truthy,
    value::{to_number, to_text, Numeric},
};
use serde_json::Value;

/// Characters `trim` removes when none are given.
const WHITESPACE: &str = " \t\n\r\0\x0B";

/// Characters after which `ucwords` starts a new word when none are given.
const WORD_DELIMITERS: &str = " \t\r\n\x0C\x0B";

/// `trim(text, characters = whitespace)`.
///
/// `a..z` in the list of characters stands for every character from `a` to `z`.
pub fn trim(arguments: &Arguments) -> Result<Value, Error> {
    let text = arguments.text(0)?;
    let characters = arguments
        .text_or_none(1)?
        .unwrap_or_else(|| WHITESPACE.to_owned());
    let ranges = character_ranges(&characters);

    let trimmed = text.trim_matches(|c: char| ranges.iter().any(|range| range.contains(&c)));
    Ok(Value::from(trimmed))
}

fn character_ranges(list: &str) -> Vec<std::ops::RangeInclusive<char>> {
    let chars: Vec<char> = list.chars().collect();
    let mut ranges = Vec::new();
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        match chars.get(i + 1..i + 4) {
            Some(&['.', '.', high]) if c <= high => {
                ranges.push(c..=high);
                i += 4;
            }
            _ => {
                ranges.push(c..=c);
                i += 1;
            }
        }
    }

    ranges
}

/// `strlen(text)`, counted in code points.
pub fn strlen(arguments: &Arguments) -> Result<Value, Error> {
    Ok(Value::from(arguments.text(0)?.chars().count()))
}

/// `substr(text, start, length = rest)`.
///
/// A negative start counts from the end, and a negative length leaves that
/// many code points off the end.
pub fn substr(arguments: &Arguments) -> Result<Value, Error> {
    let chars: Vec<char> = arguments.text(0)?.chars().collect();
    let start = arguments.integer(1)?;
    let length = arguments.integer_or_none(2)?;

    let count = chars.len() as i64;
    let begin = if start < 0 {
        count.saturating_add(start).max(0)
    } else {
        start.min(count)
    };
    let end = match length {
        None => count,
        Some(length) if length < 0 => count.saturating_add(length),
        Some(length) => begin.saturating_add(length).min(count),
    };

    let slice = &chars[begin as usize..end.max(begin) as usize];
    Ok(Value::from(slice.iter().collect::<String>()))
}

/// Return the byte offset of the code point at `index`, or the length of the
/// text if it has fewer code points.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// `strpos(haystack, needle, offset = 0)`, the code point position of the
/// first occurrence, or `false`.
pub fn strpos(arguments: &Arguments) -> Result<Value, Error> {
    let haystack = arguments.text(0)?;
    let needle = arguments.text(1)?;
    let offset = arguments.integer_or_none(2)?.unwrap_or(0);

    let count = haystack.chars().count() as i64;
    let start = if offset < 0 { count + offset } else { offset };
    if !(0..=count).contains(&start) {
        return Err(error_argument(arguments.name(), 2, "an offset within the text"));
    }

    let from = byte_offset(&haystack, start as usize);
    let found = haystack[from..].find(&needle).map(|position| {
        let skipped = haystack[from..from + position].chars().count() as i64;
        Value::from(start + skipped)
    });

    Ok(found.unwrap_or(Value::Bool(false)))
}

/// `strstr(haystack, needle, before_needle = false)`.
///
/// Returns the text from the first occurrence of the needle, or the text
/// before it, or `false` if there is none.
pub fn strstr(arguments: &Arguments) -> Result<Value, Error> {
    let haystack = arguments.text(0)?;
    let needle = arguments.text(1)?;
    let before = arguments.value(2).is_some_and(is_truthy);

    let Some(position) = haystack.find(&needle) else {
        return Ok(Value::Bool(false));
    };

    let part = if before {
        &haystack[..position]
    } else {
        &haystack[position..]
    };
    Ok(Value::from(part))
}

/// `ucfirst(text)`.
pub fn ucfirst(arguments: &Arguments) -> Result<Value, Error> {
    let text = arguments.text(0)?;
    let mut chars = text.chars();

    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Ok(Value::from(capitalized))
}

/// `ucwords(text, delimiters = whitespace)`.
pub fn ucwords(arguments: &Arguments) -> Result<Value, Error> {
    let text = arguments.text(0)?;
    let delimiters = arguments
        .text_or_none(1)?
        .unwrap_or_else(|| WORD_DELIMITERS.to_owned());

    let mut output = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            output.extend(c.to_uppercase());
        } else {
            output.push(c);
        }
        word_start = delimiters.contains(c);
    }

    Ok(Value::from(output))
}

/// `strtoupper(text)`.
pub fn strtoupper(arguments: &Arguments) -> Result<Value, Error> {
    Ok(Value::from(arguments.text(0)?.to_uppercase()))
}

/// `strtolower(text)`.
pub fn strtolower(arguments: &Arguments) -> Result<Value, Error> {
    Ok(Value::from(arguments.text(0)?.to_lowercase()))
}

/// `strip_tags(text, allowed = none)`.
///
/// Allowed tags are given either as text, such as `<a><b>`, or as a list of
/// names. Comments are always removed, and so is everything after a tag that
/// is never closed.
pub fn strip_tags(arguments: &Arguments) -> Result<Value, Error> {
    let text = arguments.text(0)?;
    let allowed: Vec<String> = match arguments.value(1) {
        None => Vec::new(),
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(to_text)
            .map(|tag| tag.trim_matches(['<', '>', '/']).to_lowercase())
            .collect(),
        Some(_) => arguments
            .text(1)?
            .split(['<', '>', '/'])
            .filter(|tag| !tag.is_empty())
            .map(str::to_lowercase)
            .collect(),
    };

    Ok(Value::from(remove_tags(&text, &allowed)))
}

fn remove_tags(text: &str, allowed: &[String]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        output.push_str(&rest[..open]);
        let tag = &rest[open..];

        // A `<` before whitespace is text.
        if tag[1..].chars().next().map_or(true, char::is_whitespace) {
            output.push('<');
            rest = &tag[1..];
            continue;
        }

        let end = if tag.starts_with("<!--") {
            tag.find("-->").map(|end| end + 3)
        } else {
            tag_end(tag)
        };
        let Some(end) = end else {
            return output;
        };

        let name = tag_name(&tag[..end]);
        if !name.is_empty() && allowed.contains(&name) {
            output.push_str(&tag[..end]);
        }
        rest = &tag[end..];
    }

    output.push_str(rest);
    output
}

/// Return the offset just past the `>` that closes `tag`, ignoring any `>`
/// inside a quoted attribute value.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tag.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i + 1),
            None => {}
        }
    }

    None
}

fn tag_name(tag: &str) -> String {
    tag[1..]
        .trim_start_matches('/')
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

/// `str_replace(search, replace, subject)`.
///
/// Search and replace may each be text or a list. With a list of searches and
/// a single replacement, every search is replaced by it. With two lists, they
/// pair up, and a search without a replacement is removed. A list subject has
/// every item replaced.
pub fn str_replace(arguments: &Arguments) -> Result<Value, Error> {
    let is_list = |index| matches!(arguments.value(index), Some(Value::Array(_)));
    if !is_list(0) && is_list(1) {
        return Err(error_argument(arguments.name(), 1, "text when searching for text"));
    }

    let searches = texts(arguments, 0)?;
    let replacements = texts(arguments, 1)?;
    let pairs: Vec<(String, String)> = searches
        .into_iter()
        .enumerate()
        .map(|(i, search)| {
            let replacement = match is_list(1) {
                true => replacements.get(i).cloned().unwrap_or_default(),
                false => replacements.concat(),
            };
            (search, replacement)
        })
        .collect();

    let replace_all = |subject: &str| {
        pairs
            .iter()
            .filter(|(search, _)| !search.is_empty())
            .fold(subject.to_owned(), |text, (search, replacement)| {
                text.replace(search.as_str(), replacement)
            })
    };

    match arguments.value(2) {
        Some(Value::Array(subjects)) => subjects
            .iter()
            .map(|subject| to_text(subject).map(|text| Value::from(replace_all(&text))))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
            .ok_or_else(|| error_argument(arguments.name(), 2, "a list of text")),
        _ => Ok(Value::from(replace_all(&arguments.text(2)?))),
    }
}

/// Return the argument at `index` as a list of text, wrapping plain text in
/// a list of one.
fn texts(arguments: &Arguments, index: usize) -> Result<Vec<String>, Error> {
    match arguments.value(index) {
        Some(Value::Array(list)) => list
            .iter()
            .map(to_text)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| error_argument(arguments.name(), index, "a list of text")),
        _ => Ok(vec![arguments.text(index)?]),
    }
}

/// `urlencode(text)`, with spaces as `+`.
pub fn urlencode(arguments: &Arguments) -> Result<Value, Error> {
    Ok(Value::from(encode::urlencode(&arguments.text(0)?)))
}

/// `rawurlencode(text)`, with spaces as `%20`.
pub fn rawurlencode(arguments: &Arguments) -> Result<Value, Error> {
    Ok(Value::from(encode::rawurlencode(&arguments.text(0)?)))
}

/// `sprintf(format, ...values)`.
///
/// Each conversion is written as `%[position$][flags][width][.precision]`
/// followed by one of `b c d e E f F g G o s u x X`, and `%%` is a literal
/// `%`. The flags are `-` to align left, `+` to always show the sign, `0` or
/// a space to pad with that character, and `'` followed by any other padding
/// character.
pub fn sprintf(arguments: &Arguments) -> Result<Value, Error> {
    let format: Vec<char> = arguments.text(0)?.chars().collect();
    let values = arguments.rest(1);

    let mut output = String::with_capacity(format.len());
    let mut next = 0;
    let mut i = 0;
    while let Some(&c) = format.get(i) {
        i += 1;
        if c != '%' {
            output.push(c);
            continue;
        }
        if format.get(i) == Some(&'%') {
            output.push('%');
            i += 1;
            continue;
        }

        let conversion = Conversion::parse(&format, &mut i)
            .ok_or_else(|| error_argument(arguments.name(), 0, "a valid format"))?;
        let index = conversion.position.unwrap_or_else(|| {
            next += 1;
            next - 1
        });
        let value = values.get(index).ok_or_else(|| {
            error_argument(arguments.name(), index + 1, "given for every conversion")
        })?;
        let rendered = conversion.render(value).ok_or_else(|| {
            error_argument(
                arguments.name(),
                index + 1,
                format_args!("usable with `%{}`", conversion.specifier),
            )
        })?;

        output.push_str(&rendered);
    }

    Ok(Value::from(output))
}

/// One `%` conversion of a `sprintf` format.
#[derive(Debug, PartialEq)]
struct Conversion {
    /// Zero based index of the value, when given explicitly.
    position: Option<usize>,
    left: bool,
    plus: bool,
    pad: char,
    width: usize,
    precision: Option<usize>,
    specifier: char,
}

impl Conversion {
    /// Parse a conversion from `format`, starting just after the `%`.
    fn parse(format: &[char], i: &mut usize) -> Option<Self> {
        let digits = |i: &mut usize| {
            let start = *i;
            while format.get(*i).is_some_and(char::is_ascii_digit) {
                *i += 1;
            }
            (*i > start).then(|| format[start..*i].iter().collect::<String>().parse::<usize>())
        };

        let mut position = None;
        let start = *i;
        if let Some(number) = digits(i) {
            if format.get(*i) == Some(&'$') {
                position = Some(number.ok()?.checked_sub(1)?);
                *i += 1;
            } else {
                *i = start;
            }
        }

        let mut conversion = Conversion {
            position,
            left: false,
            plus: false,
            pad: ' ',
            width: 0,
            precision: None,
            specifier: 's',
        };
        loop {
            match format.get(*i)? {
                '-' => conversion.left = true,
                '+' => conversion.plus = true,
                '0' => conversion.pad = '0',
                ' ' => conversion.pad = ' ',
                '\'' => {
                    *i += 1;
                    conversion.pad = *format.get(*i)?;
                }
                _ => break,
            }
            *i += 1;
        }

        if let Some(width) = digits(i) {
            conversion.width = width.ok()?;
        }
        if format.get(*i) == Some(&'.') {
            *i += 1;
            conversion.precision = Some(digits(i).transpose().ok()?.unwrap_or(0));
        }

        conversion.specifier = *format.get(*i)?;
        *i += 1;
        "bcdeEfFgGosuxX"
            .contains(conversion.specifier)
            .then_some(conversion)
    }

    fn render(&self, value: &Value) -> Option<String> {
        let body = match self.specifier {
            's' => {
                let text = to_text(value)?;
                let text = match self.precision {
                    Some(precision) => text.chars().take(precision).collect(),
                    None => text,
                };
                return Some(self.pad(text, false));
            }
            'c' => {
                let code = u32::try_from(integer(value)?).ok()?;
                return char::from_u32(code).map(String::from);
            }
            'd' => self.signed(integer(value)?.to_string()),
            'u' => (integer(value)? as u64).to_string(),
            'b' => format!("{:b}", integer(value)?),
            'o' => format!("{:o}", integer(value)?),
            'x' => format!("{:x}", integer(value)?),
            'X' => format!("{:X}", integer(value)?),
            'e' | 'E' => {
                let text = exponent(float(value)?, self.precision.unwrap_or(6));
                let text = self.signed(text);
                match self.specifier {
                    'E' => text.to_uppercase(),
                    _ => text,
                }
            }
            'f' | 'F' => self.signed(format!("{:.*}", self.precision.unwrap_or(6), float(value)?)),
            _ => {
                let text = self.signed(general(float(value)?, self.precision.unwrap_or(6)));
                match self.specifier {
                    'G' => text.to_uppercase(),
                    _ => text,
                }
            }
        };

        Some(self.pad(body, true))
    }

    fn signed(&self, text: String) -> String {
        match self.plus && !text.starts_with('-') {
            true => format!("+{text}"),
            false => text,
        }
    }

    /// Pad `body` to the width. Zeros go between the sign and the digits of
    /// a number.
    fn pad(&self, body: String, numeric: bool) -> String {
        let length = body.chars().count();
        if length >= self.width {
            return body;
        }

        let padding: String = std::iter::repeat(self.pad)
            .take(self.width - length)
            .collect();
        if self.left {
            return body + &padding;
        }

        match body.strip_prefix(['-', '+']) {
            Some(digits) if numeric && self.pad == '0' => {
                format!("{}{padding}{digits}", &body[..1])
            }
            _ => padding + &body,
        }
    }
}

/// Return the integer a `sprintf` value stands for. Text that is not a
/// number counts as zero.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        _ => Some(match to_number(value) {
            Some(Numeric::Integer(integer)) => integer,
            Some(Numeric::Float(float)) => float.trunc() as i64,
            None => 0,
        }),
    }
}

fn float(value: &Value) -> Option<f64> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        _ => Some(to_number(value).map_or(0.0, Numeric::as_f64)),
    }
}

/// Scientific notation with a signed exponent, such as `1.5e+3`.
fn exponent(float: f64, precision: usize) -> String {
    let text = format!("{:.*e}", precision, float);
    match text.split_once('e') {
        Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
            Some(digits) => format!("{mantissa}e-{digits}"),
            None => format!("{mantissa}e+{exponent}"),
        },
        None => text,
    }
}

/// The shorter of fixed and scientific notation for `precision` significant
/// digits, without trailing zeros.
fn general(float: f64, precision: usize) -> String {
    let precision = precision.max(1);
    let magnitude = match float {
        float if float == 0.0 || !float.is_finite() => 0,
        float => format!("{:.*e}", precision - 1, float)
            .split_once('e')
            .and_then(|(_, exponent)| exponent.parse::<i64>().ok())
            .unwrap_or(0),
    };

    if magnitude < -4 || magnitude >= precision as i64 {
        let text = exponent(float, precision - 1);
        return match text.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
            None => text,
        };
    }

    let decimals = (precision as i64 - 1 - magnitude).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, float)).to_owned()
}

fn trim_fraction(number: &str) -> &str {
    match number.contains('.') {
        true => number.trim_end_matches('0').trim_end_matches('.'),
        false => number,
    }
}

#[cfg(test)]
mod tests {
    use crate::function::call_with;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn call(name: &str, values: Vec<Value>) -> Value {
        call_with(name, values).unwrap()
    }

    fn sprintf(values: Vec<Value>) -> Value {
        call("sprintf", values)
    }

    #[test]
    fn test_trim() {
        assert_eq!(call("trim", vec![json!("     ahoj  ")]), json!("ahoj"));
        assert_eq!(call("trim", vec![json!("\t\nahoj\0")]), json!("ahoj"));
        assert_eq!(call("trim", vec![json!("xxahojxx"), json!("x")]), json!("ahoj"));
        assert_eq!(call("trim", vec![json!("abc123cba"), json!("a..c")]), json!("123"));
        assert_eq!(call("trim", vec![json!("..a.."), json!(".")]), json!("a"));
    }

    #[test]
    fn test_code_point_functions() {
        assert_eq!(call("strlen", vec![json!("ahoj")]), json!(4));
        assert_eq!(call("strlen", vec![json!("Miškech")]), json!(7));
        assert_eq!(call("strlen", vec![json!(10.5)]), json!(4));
        assert_eq!(call("strtoupper", vec![json!("miškech")]), json!("MIŠKECH"));
        assert_eq!(call("strtolower", vec![json!("TITle")]), json!("title"));
    }

    #[test]
    fn test_substr() {
        let substr = |values: Vec<Value>| call("substr", values);

        assert_eq!(substr(vec![json!("ahoj"), json!(-3), json!(2)]), json!("ho"));
        assert_eq!(substr(vec![json!("Miškech"), json!(2), json!(3)]), json!("ške"));
        assert_eq!(substr(vec![json!("ahoj"), json!(1)]), json!("hoj"));
        assert_eq!(substr(vec![json!("ahoj"), json!(0), json!(-1)]), json!("aho"));
        assert_eq!(substr(vec![json!("ahoj"), json!(10)]), json!(""));
        assert_eq!(substr(vec![json!("ahoj"), json!(-10), json!(2)]), json!("ah"));
        assert_eq!(substr(vec![json!("ahoj"), json!(3), json!(-2)]), json!(""));
        assert_eq!(substr(vec![json!("Y-m-d,, H:i"), json!(0)]), json!("Y-m-d,, H:i"));
    }

    #[test]
    fn test_strpos_and_strstr() {
        assert_eq!(call("strpos", vec![json!("ahoj"), json!("ho")]), json!(1));
        assert_eq!(call("strpos", vec![json!("šaša"), json!("a"), json!(2)]), json!(3));
        assert_eq!(call("strpos", vec![json!("ahoj"), json!("o"), json!(-2)]), json!(2));
        assert_eq!(call("strpos", vec![json!("ahoj"), json!("x")]), json!(false));
        assert!(call_with("strpos", vec![json!("ahoj"), json!("a"), json!(5)]).is_err());

        assert_eq!(call("strstr", vec![json!("ahoj"), json!("h")]), json!("hoj"));
        assert_eq!(call("strstr", vec![json!("ahoj"), json!("h"), json!(true)]), json!("a"));
        assert_eq!(call("strstr", vec![json!("ahoj"), json!("x")]), json!(false));
    }

    #[test]
    fn test_capitalization() {
        assert_eq!(call("ucfirst", vec![json!("ahoj")]), json!("Ahoj"));
        assert_eq!(call("ucfirst", vec![json!("štěstí")]), json!("Štěstí"));
        assert_eq!(call("ucfirst", vec![json!("")]), json!(""));
        assert_eq!(call("ucwords", vec![json!("ahoj test")]), json!("Ahoj Test"));
        assert_eq!(call("ucwords", vec![json!("ahoj-test case"), json!("-")]), json!("Ahoj-Test case"));
    }

    #[test]
    fn test_strip_tags() {
        let strip = |values: Vec<Value>| call("strip_tags", values);

        assert_eq!(strip(vec![json!("<a>Cau</a>")]), json!("Cau"));
        assert_eq!(strip(vec![json!("<p title=\"a>b\">x</p><!-- note -->y")]), json!("xy"));
        assert_eq!(strip(vec![json!("1 < 2 <b")]), json!("1 < 2 "));
        assert_eq!(
            strip(vec![json!("<b>bold</b> <i>it</i>"), json!("<b>")]),
            json!("<b>bold</b> it")
        );
        assert_eq!(
            strip(vec![json!("<b>bold</b> <I>it</I>"), json!(["i"])]),
            json!("bold <I>it</I>")
        );
    }

    #[test]
    fn test_str_replace() {
        let replace = |values: Vec<Value>| call("str_replace", values);

        assert_eq!(replace(vec![json!("Cau"), json!("Hi"), json!("<a>Cau</a>")]), json!("<a>Hi</a>"));
        assert_eq!(replace(vec![json!(["a", "b"]), json!("x"), json!("abc")]), json!("xxc"));
        assert_eq!(replace(vec![json!(["a", "b"]), json!(["1"]), json!("abc")]), json!("1c"));
        assert_eq!(replace(vec![json!("a"), json!("b"), json!(["a", "ca"])]), json!(["b", "cb"]));
        assert_eq!(replace(vec![json!(""), json!("x"), json!("abc")]), json!("abc"));
        assert!(call_with("str_replace", vec![json!("a"), json!(["b"]), json!("a")]).is_err());
    }

    #[test]
    fn test_url_encoding() {
        let text = json!("Jakub Miškech");

        assert_eq!(call("urlencode", vec![text.clone()]), json!("Jakub+Mi%C5%A1kech"));
        assert_eq!(call("rawurlencode", vec![text]), json!("Jakub%20Mi%C5%A1kech"));
    }

    #[test]
    fn test_sprintf_strings() {
        assert_eq!(sprintf(vec![json!("Test %s"), json!("ahoj")]), json!("Test ahoj"));
        assert_eq!(sprintf(vec![json!("%2$s %1$s"), json!("a"), json!("b")]), json!("b a"));
        assert_eq!(sprintf(vec![json!("%'*10s"), json!("hi")]), json!("********hi"));
        assert_eq!(sprintf(vec![json!("[%-4s]"), json!("hi")]), json!("[hi  ]"));
        assert_eq!(sprintf(vec![json!("%.2s"), json!("ahoj")]), json!("ah"));
        assert_eq!(sprintf(vec![json!("100%%")]), json!("100%"));
    }

    #[test]
    fn test_sprintf_numbers() {
        assert_eq!(sprintf(vec![json!("%05.2f"), json!(3.14159)]), json!("03.14"));
        assert_eq!(sprintf(vec![json!("%d|%-5d|"), json!("7.9"), json!(42)]), json!("7|42   |"));
        assert_eq!(sprintf(vec![json!("%+d %+d"), json!(5), json!(-5)]), json!("+5 -5"));
        assert_eq!(sprintf(vec![json!("%05d"), json!(-42)]), json!("-0042"));
        assert_eq!(
            sprintf(vec![json!("%b %o %x %X"), json!(10), json!(10), json!(255), json!(255)]),
            json!("1010 12 ff FF")
        );
        assert_eq!(sprintf(vec![json!("%c"), json!(65)]), json!("A"));
        assert_eq!(sprintf(vec![json!("%u"), json!(-1)]), json!("18446744073709551615"));
        assert_eq!(sprintf(vec![json!("%e"), json!(1234.5)]), json!("1.234500e+3"));
        assert_eq!(sprintf(vec![json!("%.3E"), json!(0.00012)]), json!("1.200E-4"));
        assert_eq!(sprintf(vec![json!("%g"), json!(0.00001234)]), json!("1.234e-5"));
        assert_eq!(sprintf(vec![json!("%g"), json!(123.0)]), json!("123"));
        assert_eq!(sprintf(vec![json!("%.1f"), json!("abc")]), json!("0.0"));
    }

    #[test]
    fn test_sprintf_failures() {
        assert!(call_with("sprintf", vec![json!("%s %s"), json!("a")]).is_err());
        assert!(call_with("sprintf", vec![json!("%y"), json!("a")]).is_err());
        assert!(call_with("sprintf", vec![json!("%0$s"), json!("a")]).is_err());
        assert!(call_with("sprintf", vec![json!("%d"), json!([1])]).is_err());
        assert!(call_with("sprintf", vec![json!("trailing %")]).is_err());
    }
}
