//! Issuer key documents.
//!
//! Keys travel as XML in the idemix namespace. Integers are unsigned decimal
//! text; the public key carries exactly six positional `Base_i` elements.
//!
//! ```text
//! IssuerPrivateKey > Elements > { p, q, pPrime, qPrime }
//! IssuerPublicKey  > Elements > { n, Z, S, Bases[num] > Base_0..Base_5 }
//!                  > Features > Epoch[length]
//! ```

use std::io::Write;

use num_bigint::BigUint;
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};

use crate::{
    errors::DocumentError,
    keys::{Bases, PublicKey, SecretKey},
    types::NUM_BASES,
};

pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;
pub const IDEMIX_NAMESPACE: &str = "http://www.zurich.ibm.com/security/idemix";

const SECRET_KEY_ROOT: &str = "IssuerPrivateKey";
const PUBLIC_KEY_ROOT: &str = "IssuerPublicKey";
// Deepest key document is root > Elements > Bases > Base_i.
const MAX_DEPTH: usize = 8;
const BASE_TAGS: [&str; NUM_BASES] = ["Base_0", "Base_1", "Base_2", "Base_3", "Base_4", "Base_5"];

/// Parsed element: local name, attributes, concatenated text, children.
#[derive(Debug, Default)]
struct Element {
    prefix: Option<String>,
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, DocumentError> {
        let qname = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let (prefix, name) = qname
            .split_once(':')
            .map_or_else(|| (None, qname.clone()), |(p, n)| (Some(p.to_owned()), n.to_owned()));
        let mut attrs = Vec::new();
        for a in e.attributes() {
            let a = a?;
            let key = String::from_utf8_lossy(a.key.as_ref()).into_owned();
            attrs.push((key, a.unescape_value()?.into_owned()));
        }
        Ok(Self { prefix, name, attrs, ..Self::default() })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn find(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    fn child(&self, name: &'static str) -> Result<&Self, DocumentError> {
        self.find(name).ok_or(DocumentError::MissingElement(name))
    }

    fn integer(&self, name: &'static str) -> Result<BigUint, DocumentError> {
        parse_integer(name, &self.child(name)?.text)
    }

    fn namespace(&self) -> Option<&str> {
        self.prefix
            .as_ref()
            .map_or_else(|| self.attr("xmlns"), |p| self.attr(&format!("xmlns:{p}")))
    }
}

fn parse_integer(element: &'static str, text: &str) -> Result<BigUint, DocumentError> {
    let t = text.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DocumentError::InvalidInteger { element, value: text.to_owned() });
    }
    BigUint::parse_bytes(t.as_bytes(), 10)
        .ok_or_else(|| DocumentError::InvalidInteger { element, value: text.to_owned() })
}

fn parse_document(xml: &str) -> Result<Element, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut stack: Vec<Element> = Vec::new();
    loop {
        let closed = match reader.read_event()? {
            Event::Start(e) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(DocumentError::Syntax("nesting too deep".into()));
                }
                stack.push(Element::from_start(&e)?);
                continue;
            }
            Event::Empty(e) => Element::from_start(&e)?,
            Event::End(_) => stack
                .pop()
                .ok_or_else(|| DocumentError::Syntax("unbalanced end tag".into()))?,
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&t.unescape()?);
                }
                continue;
            }
            Event::CData(t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&t));
                }
                continue;
            }
            Event::Eof => return Err(DocumentError::Syntax("unexpected end of document".into())),
            _ => continue,
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => return Ok(closed),
        }
    }
}

fn expect_root(root: &Element, expected: &'static str) -> Result<(), DocumentError> {
    if root.name != expected {
        return Err(DocumentError::UnexpectedRoot { expected, got: root.name.clone() });
    }
    match root.namespace() {
        Some(IDEMIX_NAMESPACE) => Ok(()),
        other => Err(DocumentError::WrongNamespace {
            expected: IDEMIX_NAMESPACE,
            got: other.map(str::to_owned),
        }),
    }
}

fn start<W: Write>(w: &mut Writer<W>, tag: &str) -> Result<(), DocumentError> {
    w.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn end<W: Write>(w: &mut Writer<W>, tag: &str) -> Result<(), DocumentError> {
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn integer<W: Write>(w: &mut Writer<W>, tag: &str, value: &BigUint) -> Result<(), DocumentError> {
    start(w, tag)?;
    w.write_event(Event::Text(BytesText::new(&value.to_string())))?;
    end(w, tag)
}

fn root_start<W: Write>(w: &mut Writer<W>, tag: &str) -> Result<(), DocumentError> {
    let mut root = BytesStart::new(tag);
    root.push_attribute(("xmlns", IDEMIX_NAMESPACE));
    w.write_event(Event::Start(root))?;
    Ok(())
}

fn finish(body: Vec<u8>) -> Result<String, DocumentError> {
    let body = String::from_utf8(body).map_err(|e| DocumentError::Syntax(e.to_string()))?;
    Ok(format!("{XML_HEADER}\n{body}"))
}

/// Encode a secret key, including the derived `pPrime`/`qPrime`.
///
/// # Errors
///
/// Returns `DocumentError::Syntax` if the XML writer fails.
pub fn encode_secret_key(sk: &SecretKey) -> Result<String, DocumentError> {
    let mut w = Writer::new(Vec::new());
    root_start(&mut w, SECRET_KEY_ROOT)?;
    start(&mut w, "Elements")?;
    integer(&mut w, "p", &sk.p)?;
    integer(&mut w, "q", &sk.q)?;
    integer(&mut w, "pPrime", &sk.p_prime)?;
    integer(&mut w, "qPrime", &sk.q_prime)?;
    end(&mut w, "Elements")?;
    end(&mut w, SECRET_KEY_ROOT)?;
    finish(w.into_inner())
}

/// Decode a secret key document.
///
/// `pPrime` and `qPrime` are recomputed from `p` and `q`; when the document
/// carries them they must agree.
///
/// # Errors
///
/// Returns `DocumentError` if the document is not well-formed XML, has the
/// wrong root or namespace, lacks `p` or `q`, or carries inconsistent values.
pub fn decode_secret_key(xml: &str) -> Result<SecretKey, DocumentError> {
    decode_secret_key_inner(xml)
        .inspect_err(|e| tracing::warn!(error = %e, "rejected issuer secret key document"))
}

fn decode_secret_key_inner(xml: &str) -> Result<SecretKey, DocumentError> {
    let root = parse_document(xml)?;
    expect_root(&root, SECRET_KEY_ROOT)?;
    let elements = root.child("Elements")?;
    let sk = SecretKey::new(elements.integer("p")?, elements.integer("q")?);
    if elements.find("pPrime").is_some() && elements.integer("pPrime")? != sk.p_prime {
        return Err(DocumentError::Inconsistent { element: "pPrime", from: "p" });
    }
    if elements.find("qPrime").is_some() && elements.integer("qPrime")? != sk.q_prime {
        return Err(DocumentError::Inconsistent { element: "qPrime", from: "q" });
    }
    Ok(sk)
}

/// Encode a public key. Always writes six bases.
///
/// # Errors
///
/// Returns `DocumentError::Syntax` if the XML writer fails.
pub fn encode_public_key(pk: &PublicKey) -> Result<String, DocumentError> {
    let mut w = Writer::new(Vec::new());
    root_start(&mut w, PUBLIC_KEY_ROOT)?;
    start(&mut w, "Elements")?;
    integer(&mut w, "n", &pk.n)?;
    integer(&mut w, "Z", &pk.z)?;
    integer(&mut w, "S", &pk.s)?;
    let mut bases = BytesStart::new("Bases");
    bases.push_attribute(("num", NUM_BASES.to_string().as_str()));
    w.write_event(Event::Start(bases))?;
    for (tag, base) in BASE_TAGS.into_iter().zip(pk.r.iter()) {
        integer(&mut w, tag, base)?;
    }
    end(&mut w, "Bases")?;
    end(&mut w, "Elements")?;
    start(&mut w, "Features")?;
    let mut epoch = BytesStart::new("Epoch");
    epoch.push_attribute(("length", pk.epoch_length.to_string().as_str()));
    w.write_event(Event::Empty(epoch))?;
    end(&mut w, "Features")?;
    end(&mut w, PUBLIC_KEY_ROOT)?;
    finish(w.into_inner())
}

/// Decode a public key document under the default system parameters.
///
/// The `num` attribute on `Bases` is ignored; all of `Base_0`..`Base_5` must
/// be present. A missing `Features` element means epoch length 0.
///
/// # Errors
///
/// Returns `DocumentError` if the document is not well-formed XML, has the
/// wrong root or namespace, lacks `n`, `Z`, `S` or any of the six bases, or
/// carries a non-integer value.
pub fn decode_public_key(xml: &str) -> Result<PublicKey, DocumentError> {
    decode_public_key_inner(xml)
        .inspect(|pk| tracing::debug!(epoch_length = pk.epoch_length, "decoded issuer public key"))
        .inspect_err(|e| tracing::warn!(error = %e, "rejected issuer public key document"))
}

fn decode_public_key_inner(xml: &str) -> Result<PublicKey, DocumentError> {
    let root = parse_document(xml)?;
    expect_root(&root, PUBLIC_KEY_ROOT)?;
    let elements = root.child("Elements")?;
    let n = elements.integer("n")?;
    let z = elements.integer("Z")?;
    let s = elements.integer("S")?;
    let r = decode_bases(elements.child("Bases")?)?;

    let epoch_length = root
        .find("Features")
        .and_then(|f| f.find("Epoch"))
        .and_then(|epoch| epoch.attr("length"))
        .map_or(Ok(0), |v| {
            v.trim().parse::<u64>().map_err(|_| DocumentError::InvalidInteger {
                element: "Epoch",
                value: v.to_owned(),
            })
        })?;

    Ok(PublicKey::new(n, z, s, r).with_epoch_length(epoch_length))
}

fn decode_bases(bases: &Element) -> Result<Bases, DocumentError> {
    let found: Vec<Option<&Element>> = BASE_TAGS.into_iter().map(|tag| bases.find(tag)).collect();
    let present = found.iter().flatten().count();
    if present != NUM_BASES {
        return Err(DocumentError::MissingBases { expected: NUM_BASES, got: present });
    }
    let mut out: Vec<BigUint> = Vec::with_capacity(NUM_BASES);
    for (tag, el) in BASE_TAGS.into_iter().zip(found.into_iter().flatten()) {
        out.push(parse_integer(tag, &el.text)?);
    }
    out.try_into()
        .map_err(|v: Vec<BigUint>| DocumentError::MissingBases { expected: NUM_BASES, got: v.len() })
}
