//! Canonical string forms of scalar attribute values and their inverses.
//!
//! Every attribute written by the node builder goes through one of the
//! `format_*` functions here. The matching `parse_*` function accepts exactly
//! what the formatter produces, so readers can restore the original value.

use crate::error::AttributeError;
use std::collections::BTreeSet;
use taskfile_core::{Color, DATE_TIME_FORMAT, Font, FontStyle, FontWeight, ObjectId};
use time::{Duration, PrimitiveDateTime};

/// Format a date/time as `%Y-%m-%d %H:%M:%S`.
///
/// # Errors
/// Returns [`AttributeError::Format`] when `value` cannot be rendered in
/// [`DATE_TIME_FORMAT`].
pub fn format_date_time(value: PrimitiveDateTime) -> Result<String, AttributeError> {
    Ok(value.format(DATE_TIME_FORMAT)?)
}

/// Parse a `%Y-%m-%d %H:%M:%S` date/time.
///
/// # Errors
/// Returns [`AttributeError::DateTime`] when `value` does not match the layout.
pub fn parse_date_time(value: &str) -> Result<PrimitiveDateTime, AttributeError> {
    PrimitiveDateTime::parse(value, DATE_TIME_FORMAT).map_err(|source| AttributeError::DateTime {
        value: value.to_owned(),
        source,
    })
}

/// Format a duration as `H:MM:SS`, hours unbounded, negative values prefixed with `-`.
///
/// Sub-second parts are truncated.
#[must_use]
pub fn format_duration(value: Duration) -> String {
    let total = value.whole_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        total / 3600,
        total % 3600 / 60,
        total % 60
    )
}

/// Parse an `H:MM:SS` duration.
///
/// # Errors
/// Returns [`AttributeError::Duration`] when `value` is not a valid duration.
pub fn parse_duration(value: &str) -> Result<Duration, AttributeError> {
    let invalid = || AttributeError::Duration(value.to_owned());
    let (negative, body) = value
        .strip_prefix('-')
        .map_or((false, value), |rest| (true, rest));
    let mut parts = body.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if hours.is_empty() || minutes.len() != 2 || seconds.len() != 2 {
        return Err(invalid());
    }
    let hours: i64 = digits(hours).ok_or_else(invalid)?;
    let minutes: i64 = digits(minutes).ok_or_else(invalid)?;
    let seconds: i64 = digits(seconds).ok_or_else(invalid)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    let total = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)?;
    Ok(Duration::seconds(if negative { -total } else { total }))
}

fn digits(value: &str) -> Option<i64> {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

/// Format a color as `(R, G, B, A)`.
#[must_use]
pub fn format_color(color: Color) -> String {
    format!(
        "({}, {}, {}, {})",
        color.red, color.green, color.blue, color.alpha
    )
}

/// Parse `(R, G, B, A)`; a missing alpha component means opaque.
///
/// # Errors
/// Returns [`AttributeError::Color`] when `value` is not a color tuple.
pub fn parse_color(value: &str) -> Result<Color, AttributeError> {
    let invalid = || AttributeError::Color(value.to_owned());
    let inner = value
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let components = inner
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    match components[..] {
        [red, green, blue] => Ok(Color::rgb(red, green, blue)),
        [red, green, blue, alpha] => Ok(Color {
            red,
            green,
            blue,
            alpha,
        }),
        _ => Err(invalid()),
    }
}

/// Format a font as `<point size>;<weight>;<style>;<underlined 0|1>;<face>`.
///
/// The face comes last so it may contain any character, including `;`.
#[must_use]
pub fn format_font(font: &Font) -> String {
    format!(
        "{};{};{};{};{}",
        font.point_size,
        font.weight.as_str(),
        font.style.as_str(),
        u8::from(font.underlined),
        font.face
    )
}

/// Parse a font descriptor written by [`format_font`].
///
/// # Errors
/// Returns [`AttributeError::Font`] when `value` is not a font descriptor.
pub fn parse_font(value: &str) -> Result<Font, AttributeError> {
    let invalid = || AttributeError::Font(value.to_owned());
    let mut fields = value.splitn(5, ';');
    let (Some(size), Some(weight), Some(style), Some(underlined), Some(face)) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(invalid());
    };
    let weight = match weight {
        "light" => FontWeight::Light,
        "normal" => FontWeight::Normal,
        "bold" => FontWeight::Bold,
        _ => return Err(invalid()),
    };
    let style = match style {
        "normal" => FontStyle::Normal,
        "italic" => FontStyle::Italic,
        "slant" => FontStyle::Slant,
        _ => return Err(invalid()),
    };
    let underlined = match underlined {
        "0" => false,
        "1" => true,
        _ => return Err(invalid()),
    };
    Ok(Font {
        face: face.to_owned(),
        point_size: size.parse().map_err(|_| invalid())?,
        weight,
        style,
        underlined,
    })
}

/// Format a flag as `True` or `False`.
#[must_use]
pub const fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Parse `True` or `False`.
///
/// # Errors
/// Returns [`AttributeError::Boolean`] for anything else.
pub fn parse_bool(value: &str) -> Result<bool, AttributeError> {
    match value {
        "True" => Ok(true),
        "False" => Ok(false),
        other => Err(AttributeError::Boolean(other.to_owned())),
    }
}

/// Format a number without a fractional part when it is integral (`100`),
/// otherwise in shortest decimal form (`12.5`).
#[must_use]
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Space-join ids in ascending order without duplicates.
#[must_use]
pub fn format_ids<'a>(ids: impl IntoIterator<Item = &'a ObjectId>) -> String {
    let sorted: BTreeSet<&ObjectId> = ids.into_iter().collect();
    let mut out = String::new();
    for id in sorted {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(id.as_str());
    }
    out
}

/// Split a space-joined id list.
///
/// # Errors
/// Returns [`AttributeError::Ids`] when an entry is not a valid id.
pub fn parse_ids(value: &str) -> Result<Vec<ObjectId>, AttributeError> {
    value
        .split_whitespace()
        .map(|id| id.parse().map_err(AttributeError::from))
        .collect()
}

/// Format context names as a tuple literal of quoted strings: `('a', 'b')`,
/// or `('a',)` for a single name.
#[must_use]
pub fn format_contexts(contexts: &BTreeSet<String>) -> String {
    let mut out = String::from("(");
    for (index, context) in contexts.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        quote(context, &mut out);
    }
    if contexts.len() == 1 {
        out.push(',');
    }
    out.push(')');
    out
}

fn quote(value: &str, out: &mut String) {
    let delimiter = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(delimiter);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                out.push_str(&format!("\\x{:02x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
}

/// Parse a tuple literal written by [`format_contexts`].
///
/// # Errors
/// Returns [`AttributeError::Contexts`] when `value` is not a tuple of quoted strings.
pub fn parse_contexts(value: &str) -> Result<BTreeSet<String>, AttributeError> {
    let invalid = || AttributeError::Contexts(value.to_owned());
    let inner = value
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let mut contexts = BTreeSet::new();
    let mut chars = inner.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(delimiter) = chars.next() else {
            break;
        };
        if delimiter != '\'' && delimiter != '"' {
            return Err(invalid());
        }
        let mut context = String::new();
        loop {
            match chars.next().ok_or_else(invalid)? {
                '\\' => match chars.next().ok_or_else(invalid)? {
                    'n' => context.push('\n'),
                    'r' => context.push('\r'),
                    't' => context.push('\t'),
                    'x' => {
                        let hex: String = chars.by_ref().take(2).collect();
                        let code = u32::from_str_radix(&hex, 16).map_err(|_| invalid())?;
                        context.push(char::from_u32(code).ok_or_else(invalid)?);
                    }
                    other => context.push(other),
                },
                c if c == delimiter => break,
                c => context.push(c),
            }
        }
        contexts.insert(context);
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            Some(',') | None => {}
            Some(_) => return Err(invalid()),
        }
    }
    Ok(contexts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn date_time_uses_fixed_layout() -> Result<(), AttributeError> {
        let value = datetime!(2024-01-01 09:05:07);
        assert_eq!(format_date_time(value)?, "2024-01-01 09:05:07");
        assert_eq!(parse_date_time("2024-01-01 09:05:07")?, value);
        assert!(parse_date_time("2024-01-01T09:05:07").is_err());
        Ok(())
    }

    #[test]
    fn date_time_pads_every_component() -> Result<(), AttributeError> {
        let value = datetime!(0999-03-04 05:06:07);
        let text = format_date_time(value)?;
        assert_eq!(text, "0999-03-04 05:06:07");
        assert_eq!(parse_date_time(&text)?, value);
        Ok(())
    }

    #[test]
    fn duration_has_unbounded_hours() -> Result<(), AttributeError> {
        assert_eq!(format_duration(Duration::minutes(90)), "1:30:00");
        assert_eq!(format_duration(Duration::hours(25)), "25:00:00");
        assert_eq!(format_duration(Duration::seconds(-61)), "-0:01:01");
        assert_eq!(parse_duration("1:30:00")?, Duration::minutes(90));
        assert_eq!(parse_duration("-0:01:01")?, Duration::seconds(-61));
        for bad in ["1:3:00", "1:60:00", "1:00", "a:00:00", ":00:00", "1:00:00:00"] {
            assert!(parse_duration(bad).is_err(), "{bad} should be rejected");
        }
        Ok(())
    }

    #[test]
    fn color_tuple_accepts_missing_alpha() -> Result<(), AttributeError> {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(format_color(red), "(255, 0, 0, 255)");
        assert_eq!(parse_color("(255, 0, 0, 255)")?, red);
        assert_eq!(parse_color("(255,0,0)")?, red);
        assert!(parse_color("(256, 0, 0)").is_err());
        assert!(parse_color("255, 0, 0").is_err());
        Ok(())
    }

    #[test]
    fn font_face_may_contain_separator() -> Result<(), AttributeError> {
        let font = Font {
            face: "Fancy;Sans".to_owned(),
            point_size: 12,
            weight: FontWeight::Bold,
            style: FontStyle::Italic,
            underlined: true,
        };
        let text = format_font(&font);
        assert_eq!(text, "12;bold;italic;1;Fancy;Sans");
        assert_eq!(parse_font(&text)?, font);
        assert!(parse_font("12;heavy;normal;0;Sans").is_err());
        assert!(parse_font("12;bold").is_err());
        Ok(())
    }

    #[test]
    fn numbers_drop_integral_fraction() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn id_lists_are_sorted_and_unique() -> Result<(), AttributeError> {
        let ids = [ObjectId::new("b"), ObjectId::new("a"), ObjectId::new("b")];
        assert_eq!(format_ids(&ids), "a b");
        assert_eq!(parse_ids("a b")?, [ObjectId::new("a"), ObjectId::new("b")]);
        Ok(())
    }

    #[test]
    fn contexts_form_tuple_literal() -> Result<(), AttributeError> {
        let single: BTreeSet<String> = ["None".to_owned()].into();
        assert_eq!(format_contexts(&single), "('None',)");

        let many: BTreeSet<String> = ["Test".to_owned(), "Another context".to_owned()].into();
        let text = format_contexts(&many);
        assert_eq!(text, "('Another context', 'Test')");
        assert_eq!(parse_contexts(&text)?, many);

        let quoted: BTreeSet<String> = ["it's".to_owned(), "a\\b".to_owned()].into();
        let text = format_contexts(&quoted);
        assert_eq!(text, r#"('a\\b', "it's")"#);
        assert_eq!(parse_contexts(&text)?, quoted);
        Ok(())
    }

    #[test]
    fn control_characters_in_contexts_use_hex_escapes() -> Result<(), AttributeError> {
        let contexts: BTreeSet<String> = ["bell\u{1}".to_owned()].into();
        let text = format_contexts(&contexts);
        assert_eq!(text, r"('bell\x01',)");
        assert_eq!(parse_contexts(&text)?, contexts);
        Ok(())
    }

    #[test]
    fn booleans_are_capitalized() {
        assert_eq!(format_bool(true), "True");
        assert!(matches!(parse_bool("False"), Ok(false)));
        assert!(parse_bool("true").is_err());
    }
}
