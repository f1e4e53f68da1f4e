//! Type conversion from PostgreSQL columns to [`Value`].
//!
//! Dispatches on the column's type as reported in the statement metadata.
//! Domains are read as their base type and arrays element by element.
//! Text-like types without a dedicated mapping come back as text; any other
//! type is an error naming it, so the caller can cast the column to `text`.

use std::error::Error;
use std::fmt::Write;
use std::net::IpAddr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres::types::{FromSql, Kind, Type};
use postgres::Row;

use super::{DriverError, Value};

type ConvError = Box<dyn Error + Sync + Send>;

/// Any non-null column as its binary wire encoding.
struct RawBytes<'a>(&'a [u8]);

impl<'a> FromSql<'a> for RawBytes<'a> {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, ConvError> {
        Ok(RawBytes(raw))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

fn take<'a>(buf: &mut &'a [u8], n: usize) -> Result<&'a [u8], ConvError> {
    let slice: &'a [u8] = *buf;
    if slice.len() < n {
        return Err("truncated value".into());
    }
    let (head, tail) = slice.split_at(n);
    *buf = tail;
    Ok(head)
}

fn read_i32(buf: &mut &[u8]) -> Result<i32, ConvError> {
    Ok(i32::from_be_bytes(take(buf, 4)?.try_into()?))
}

fn read_i64(buf: &mut &[u8]) -> Result<i64, ConvError> {
    Ok(i64::from_be_bytes(take(buf, 8)?.try_into()?))
}

const NUMERIC_POS: u16 = 0x0000;
const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;
const NUMERIC_PINF: u16 = 0xD000;
const NUMERIC_NINF: u16 = 0xF000;

/// Decode the binary NUMERIC format: ndigits, weight, sign, dscale, then
/// `ndigits` base-10000 digits with the first at 10000^weight.
fn decode_numeric(raw: &[u8]) -> Result<String, ConvError> {
    let word = |idx: usize| -> Result<u16, ConvError> {
        raw.get(idx * 2..idx * 2 + 2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .ok_or_else(|| "truncated numeric value".into())
    };

    let ndigits = word(0)? as usize;
    let weight = word(1)? as i16 as i32;
    let sign = word(2)?;
    let dscale = word(3)? as usize;

    match sign {
        NUMERIC_POS | NUMERIC_NEG => {}
        NUMERIC_NAN => return Ok("NaN".to_string()),
        NUMERIC_PINF => return Ok("Infinity".to_string()),
        NUMERIC_NINF => return Ok("-Infinity".to_string()),
        other => return Err(format!("invalid numeric sign 0x{:04x}", other).into()),
    }

    let mut digits = Vec::with_capacity(ndigits);
    for i in 0..ndigits {
        let d = word(4 + i)?;
        if d > 9999 {
            return Err(format!("invalid numeric digit {}", d).into());
        }
        digits.push(d);
    }
    let digit_at = |idx: i32| -> u16 {
        if idx < 0 {
            0
        } else {
            digits.get(idx as usize).copied().unwrap_or(0)
        }
    };

    let mut out = String::new();
    if sign == NUMERIC_NEG {
        out.push('-');
    }

    if weight < 0 {
        out.push('0');
    } else {
        for idx in 0..=weight {
            let d = digit_at(idx);
            if idx == 0 {
                let _ = write!(out, "{}", d);
            } else {
                let _ = write!(out, "{:04}", d);
            }
        }
    }

    if dscale > 0 {
        let mut frac = String::with_capacity(dscale + 4);
        let mut idx = weight + 1;
        while frac.len() < dscale {
            let _ = write!(frac, "{:04}", digit_at(idx));
            idx += 1;
        }
        frac.truncate(dscale);
        out.push('.');
        out.push_str(&frac);
    }

    Ok(out)
}

/// 16 raw bytes as the canonical 8-4-4-4-12 form.
fn format_uuid(raw: &[u8]) -> Result<String, ConvError> {
    if raw.len() != 16 {
        return Err(format!("invalid uuid length {}", raw.len()).into());
    }
    let hex = hex::encode(raw);
    Ok(format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    ))
}

/// INTERVAL (microseconds, days, months) in the server's default
/// `postgres` interval style, e.g. `1 year 2 mons 3 days 04:05:06.5`.
fn format_interval(raw: &[u8]) -> Result<String, ConvError> {
    if raw.len() != 16 {
        return Err(format!("invalid interval length {}", raw.len()).into());
    }
    let mut buf = raw;
    let micros = read_i64(&mut buf)?;
    let days = read_i32(&mut buf)?;
    let months = read_i32(&mut buf)?;

    let mut out = String::new();
    let mut previous_negative = false;
    for (n, unit) in [(months / 12, "year"), (months % 12, "mon"), (days, "day")] {
        if n == 0 {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        if previous_negative && n > 0 {
            out.push('+');
        }
        let _ = write!(out, "{} {}{}", n, unit, if n == 1 { "" } else { "s" });
        previous_negative = n < 0;
    }

    if out.is_empty() || micros != 0 {
        if !out.is_empty() {
            out.push(' ');
        }
        if micros < 0 {
            out.push('-');
        } else if previous_negative {
            out.push('+');
        }
        let abs = micros.unsigned_abs();
        let secs = abs / 1_000_000;
        let _ = write!(out, "{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
        let frac = abs % 1_000_000;
        if frac > 0 {
            let digits = format!("{:06}", frac);
            out.push('.');
            out.push_str(digits.trim_end_matches('0'));
        }
    }
    Ok(out)
}

/// INET/CIDR: family, prefix bits, cidr flag, address length, address.
/// A host address with a full-length prefix is shown without it, as the
/// server does for `inet`.
fn format_inet(raw: &[u8], cidr: bool) -> Result<String, ConvError> {
    let [family, bits, _, len, addr @ ..] = raw else {
        return Err("truncated inet value".into());
    };
    if addr.len() != *len as usize {
        return Err(format!("invalid inet address length {}", len).into());
    }
    let (ip, max_bits) = match (*family, addr.len()) {
        (2, 4) => (IpAddr::from(<[u8; 4]>::try_from(addr)?), 32u8),
        (3, 16) => (IpAddr::from(<[u8; 16]>::try_from(addr)?), 128u8),
        _ => return Err(format!("invalid inet family {}", family).into()),
    };
    if cidr || *bits != max_bits {
        Ok(format!("{}/{}", ip, bits))
    } else {
        Ok(ip.to_string())
    }
}

fn format_macaddr(raw: &[u8]) -> Result<String, ConvError> {
    if raw.len() != 6 && raw.len() != 8 {
        return Err(format!("invalid macaddr length {}", raw.len()).into());
    }
    Ok(raw
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":"))
}

/// Binary array: ndim, has-null flag, element oid, (length, lower bound) per
/// dimension, then each element as a length-prefixed value (-1 is NULL).
/// Multi-dimensional arrays nest row-major.
fn decode_array(element: &Type, raw: &[u8]) -> Result<Value, ConvError> {
    let mut buf = raw;
    let ndim = read_i32(&mut buf)?;
    let _has_null = read_i32(&mut buf)?;
    let _element_oid = read_i32(&mut buf)?;
    if ndim < 0 {
        return Err(format!("invalid array dimension count {}", ndim).into());
    }

    let mut dims = Vec::with_capacity(ndim as usize);
    for _ in 0..ndim {
        let len = read_i32(&mut buf)?;
        let _lower_bound = read_i32(&mut buf)?;
        if len < 0 {
            return Err(format!("invalid array dimension length {}", len).into());
        }
        dims.push(len as usize);
    }
    let total = if dims.is_empty() {
        0
    } else {
        dims.iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or("array too large")?
    };

    let mut items = Vec::new();
    for _ in 0..total {
        let len = read_i32(&mut buf)?;
        if len < 0 {
            items.push(Value::Null);
        } else {
            items.push(decode(element, take(&mut buf, len as usize)?)?);
        }
    }
    if !buf.is_empty() {
        return Err("trailing bytes after array elements".into());
    }

    Ok(nest(&dims, &mut items.into_iter()))
}

fn nest<I: Iterator<Item = Value>>(dims: &[usize], items: &mut I) -> Value {
    match dims.split_first() {
        Some((&len, [])) => Value::Array(items.by_ref().take(len).collect()),
        Some((&len, rest)) => Value::Array((0..len).map(|_| nest(rest, items)).collect()),
        None => Value::Array(Vec::new()),
    }
}

/// Decode one non-null value of type `ty` from its binary encoding.
fn decode(ty: &Type, raw: &[u8]) -> Result<Value, ConvError> {
    let value = match *ty {
        Type::BOOL => Value::Bool(bool::from_sql(ty, raw)?),
        Type::INT2 => Value::Int(i16::from_sql(ty, raw)? as i64),
        Type::INT4 => Value::Int(i32::from_sql(ty, raw)? as i64),
        Type::INT8 => Value::Int(i64::from_sql(ty, raw)?),
        Type::OID => Value::Int(u32::from_sql(ty, raw)? as i64),
        Type::FLOAT4 => Value::Float(f32::from_sql(ty, raw)? as f64),
        Type::FLOAT8 => Value::Float(f64::from_sql(ty, raw)?),
        Type::CHAR => Value::Text((i8::from_sql(ty, raw)? as u8 as char).to_string()),
        Type::NUMERIC => Value::Text(decode_numeric(raw)?),
        Type::UUID => Value::Text(format_uuid(raw)?),
        Type::JSON | Type::JSONB => Value::Text(serde_json::Value::from_sql(ty, raw)?.to_string()),
        Type::DATE => Value::Date(NaiveDate::from_sql(ty, raw)?),
        Type::TIME => Value::Time(NaiveTime::from_sql(ty, raw)?),
        Type::TIMESTAMP => Value::Timestamp(NaiveDateTime::from_sql(ty, raw)?),
        Type::TIMESTAMPTZ => Value::TimestampTz(DateTime::<Utc>::from_sql(ty, raw)?),
        Type::BYTEA => Value::Bytes(raw.to_vec()),
        Type::INTERVAL => Value::Text(format_interval(raw)?),
        Type::INET => Value::Text(format_inet(raw, false)?),
        Type::CIDR => Value::Text(format_inet(raw, true)?),
        Type::MACADDR | Type::MACADDR8 => Value::Text(format_macaddr(raw)?),
        _ => match ty.kind() {
            Kind::Array(element) => decode_array(element, raw)?,
            Kind::Domain(base) => decode(base, raw)?,
            Kind::Enum(_) => Value::Text(String::from_utf8_lossy(raw).into_owned()),
            _ if <String as FromSql>::accepts(ty) => Value::Text(String::from_sql(ty, raw)?),
            _ => return Err(format!("unsupported type {}", ty.name()).into()),
        },
    };
    Ok(value)
}

/// Convert column `idx` of `row` into a [`Value`].
pub fn column_value(row: &Row, idx: usize) -> Result<Value, ConvError> {
    let column = &row.columns()[idx];
    let raw = row
        .try_get::<_, Option<RawBytes>>(idx)
        .map_err(DriverError::from)?;

    match raw {
        None => Ok(Value::Null),
        Some(RawBytes(raw)) => decode(column.type_(), raw).map_err(|e| {
            format!(
                "column \"{}\": {} (cast it to text with ::text)",
                column.name(),
                e
            )
            .into()
        }),
    }
}

/// Convert every column of `row`, in column order.
pub fn row_values(row: &Row) -> Result<Vec<Value>, ConvError> {
    (0..row.len()).map(|idx| column_value(row, idx)).collect()
}
