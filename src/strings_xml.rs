//! Support for Android-style `strings.xml` resource files.
//!
//! Top-level `<string>`, `<plurals>` and `<string-array>` elements are parsed
//! into the `StringResource` model. Any other element is skipped together with
//! its content.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
    name::QName,
};
use serde::Serialize;
use std::{collections::BTreeMap, io::BufRead};

use crate::{
    error::Error,
    placeholder,
    traits::Parser,
    types::{Plural, Quantity, StringResource},
};

/// The parsed contents of one `strings.xml`.
#[derive(Debug, Default, Serialize)]
pub struct Format {
    pub resources: BTreeMap<String, StringResource>,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut resources = BTreeMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"resources" => {}
                    b"string" => {
                        let name = required_name(e)?;
                        let value = placeholder::unescape(&read_text(&mut xml_reader)?);
                        let arg_types = placeholder::arg_types(&value)?;
                        resources.insert(name, StringResource::Singular { value, arg_types });
                    }
                    b"plurals" => {
                        let name = required_name(e)?;
                        let plural = parse_plural(&name, &mut xml_reader)?;
                        resources.insert(name, StringResource::Plural(plural));
                    }
                    b"string-array" => {
                        let name = required_name(e)?;
                        let values = parse_array(&mut xml_reader)?;
                        resources.insert(name, StringResource::Array { values });
                    }
                    other => skip_element(other.to_vec(), &mut xml_reader)?,
                },
                Ok(Event::Empty(ref e)) => {
                    let resource = match e.name().as_ref() {
                        b"string" => Some(StringResource::Singular {
                            value: String::new(),
                            arg_types: Vec::new(),
                        }),
                        b"plurals" => Some(StringResource::Plural(Plural::default())),
                        b"string-array" => Some(StringResource::Array { values: Vec::new() }),
                        _ => None,
                    };
                    if let Some(resource) = resource {
                        resources.insert(required_name(e)?, resource);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }
        Ok(Format { resources })
    }
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::InvalidResource(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn required_name(e: &BytesStart) -> Result<String, Error> {
    attribute(e, b"name")?.ok_or_else(|| {
        Error::InvalidResource(format!(
            "{} tag missing 'name'",
            String::from_utf8_lossy(e.name().as_ref())
        ))
    })
}

/// Reads the text content of the current element up to its closing tag.
/// Text inside nested markup (`<b>`, `<xliff:g>`) is kept, the tags are not.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => text.push_str(&e.unescape()?),
            Ok(Event::CData(e)) => text.push_str(&String::from_utf8_lossy(&e)),
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) if depth == 0 => break,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(text.trim().to_string())
}

fn parse_plural<R: BufRead>(name: &str, xml_reader: &mut Reader<R>) -> Result<Plural, Error> {
    let mut plural = Plural::default();
    let mut first_slot = true;
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"item" => {
                let quantity = attribute(e, b"quantity")?;
                let value = placeholder::unescape(&read_text(xml_reader)?);
                let arg_types = placeholder::arg_types(&value)?;
                if first_slot {
                    plural.arg_types = arg_types;
                    first_slot = false;
                } else if arg_types != plural.arg_types {
                    tracing::warn!(
                        key = name,
                        quantity = quantity.as_deref().unwrap_or_default(),
                        "plural slot placeholders differ from the first slot; using the first slot's"
                    );
                }
                match quantity.as_deref().map(str::parse::<Quantity>) {
                    Some(Ok(quantity)) => plural.set(quantity, value),
                    _ => tracing::debug!(key = name, ?quantity, "ignoring plural item"),
                }
            }
            Ok(Event::Start(ref e)) => skip_element(e.name().as_ref().to_vec(), xml_reader)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(plural)
}

fn parse_array<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<Vec<String>, Error> {
    let mut values = Vec::new();
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"item" => {
                values.push(placeholder::unescape(&read_text(xml_reader)?));
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"item" => values.push(String::new()),
            Ok(Event::Start(ref e)) => skip_element(e.name().as_ref().to_vec(), xml_reader)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(values)
}

fn skip_element<R: BufRead>(name: Vec<u8>, xml_reader: &mut Reader<R>) -> Result<(), Error> {
    tracing::trace!(element = %String::from_utf8_lossy(&name), "skipping element");
    let mut buf = Vec::new();
    xml_reader.read_to_end_into(QName(&name), &mut buf)?;
    Ok(())
}
