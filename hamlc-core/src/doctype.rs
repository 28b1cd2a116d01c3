//! The `!!!` doctype table.

use crate::error::{HamlError, Result};
use crate::options::Format;

/// Public identifier and DTD location of a `<!DOCTYPE html PUBLIC ...>`
struct Public {
    fpi: &'static str,
    dtd: &'static str,
}

const XHTML: &[(&str, Public)] = &[
    (
        "default",
        Public {
            fpi: "-//W3C//DTD XHTML 1.0 Transitional//EN",
            dtd: "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd",
        },
    ),
    (
        "Strict",
        Public {
            fpi: "-//W3C//DTD XHTML 1.0 Strict//EN",
            dtd: "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd",
        },
    ),
    (
        "Frameset",
        Public {
            fpi: "-//W3C//DTD XHTML 1.0 Frameset//EN",
            dtd: "http://www.w3.org/TR/xhtml1/DTD/xhtml1-frameset.dtd",
        },
    ),
    (
        "1.1",
        Public {
            fpi: "-//W3C//DTD XHTML 1.1//EN",
            dtd: "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd",
        },
    ),
    (
        "Basic",
        Public {
            fpi: "-//W3C//DTD XHTML Basic 1.1//EN",
            dtd: "http://www.w3.org/TR/xhtml-basic/xhtml-basic11.dtd",
        },
    ),
    (
        "Mobile",
        Public {
            fpi: "-//WAPFORUM//DTD XHTML Mobile 1.2//EN",
            dtd: "http://www.openmobilealliance.org/tech/DTD/xhtml-mobile12.dtd",
        },
    ),
    (
        "RDFa",
        Public {
            fpi: "-//W3C//DTD XHTML+RDFa 1.0//EN",
            dtd: "http://www.w3.org/MarkUp/DTD/xhtml-rdfa-1.dtd",
        },
    ),
];

/// Entries replacing their XHTML counterparts in html4 mode
const HTML4: &[(&str, Public)] = &[
    (
        "default",
        Public {
            fpi: "-//W3C//DTD HTML 4.01 Transitional//EN",
            dtd: "http://www.w3.org/TR/html4/loose.dtd",
        },
    ),
    (
        "Strict",
        Public {
            fpi: "-//W3C//DTD HTML 4.01//EN",
            dtd: "http://www.w3.org/TR/html4/strict.dtd",
        },
    ),
    (
        "Frameset",
        Public {
            fpi: "-//W3C//DTD HTML 4.01 Frameset//EN",
            dtd: "http://www.w3.org/TR/html4/frameset.dtd",
        },
    ),
];

fn lookup(table: &'static [(&'static str, Public)], id: &str) -> Option<&'static Public> {
    table.iter().find(|(key, _)| *key == id).map(|(_, public)| public)
}

/// Resolve the words following `!!!` to the doctype literal
pub fn resolve(text: &str, format: Format, line: usize) -> Result<String> {
    let mut words = text.split_whitespace();

    let id = match words.next() {
        None => "default",
        Some("XML") => {
            let encoding = words.next().unwrap_or("utf-8");
            return Ok(format!("<?xml version='1.0' encoding='{}' ?>", encoding));
        }
        Some("5") => return Ok(String::from("<!DOCTYPE html>")),
        Some(id) => id,
    };

    let html4 = match format {
        Format::Html4 => lookup(HTML4, id),
        Format::Xhtml => None,
    };

    html4
        .or_else(|| lookup(XHTML, id))
        .map(|public| format!("<!DOCTYPE html PUBLIC \"{}\" \"{}\">", public.fpi, public.dtd))
        .ok_or_else(|| HamlError::UnknownDoctypeToken {
            line,
            token: id.to_string(),
        })
}
