use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

fn go_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)").unwrap())
}

fn ec_number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(((([0-9-]+)\.[0-9-]+)\.[0-9-]+)\.[a-z0-9-]+)").unwrap())
}

/// One Gene Ontology term attached to a functional annotation.
///
/// The `go_id` holds only the numeric portion, without "GO" or "GO:" or
/// anything else attached, leaving callers free to format it as required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoAnnotation {
    pub go_id: String,
    /// Evidence code, stored as given (no validation against the GO set).
    pub ev_code: String,
    /// The "with/from" qualifier, stored as given.
    pub with_from: String,
}

impl GoAnnotation {
    /// Normalizes any GO ID form down to its first run of digits, so
    /// "GO:0005575" and "0005575" both store "0005575". An identifier with
    /// no digits at all is rejected.
    pub fn new(go_id: &str, ev_code: &str, with_from: &str) -> Result<Self, ValidationError> {
        let m = go_id_pattern()
            .find(go_id)
            .ok_or_else(|| ValidationError::NoNumericGoId(go_id.to_string()))?;

        Ok(Self {
            go_id: m.as_str().to_string(),
            ev_code: ev_code.to_string(),
            with_from: with_from.to_string(),
        })
    }
}

/// One Enzyme Commission number attached to a functional annotation.
///
/// The official terms for the levels are 'class', 'subclass' etc., but those
/// collide with keywords in most languages, so the prefixes are exposed as
/// numbered classes instead:
///
/// ```text
/// class1 = 1          = Oxidoreductases
/// class2 = 1.10       = Acting on diphenols and related substances as donors
/// class3 = 1.10.3     = With oxygen as acceptor
/// number = 1.10.3.2   = laccase
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcAnnotation {
    pub number: String,
    pub class1: String,
    pub class2: String,
    pub class3: String,
}

impl EcAnnotation {
    /// Parses an N.N.N.N number (N = digits or a dash; the terminal segment
    /// may also carry letters, as in preliminary "n" entries). The three
    /// class prefixes are derived from the nested match groups.
    pub fn new(number: &str) -> Result<Self, ValidationError> {
        let caps = ec_number_pattern()
            .captures(number)
            .ok_or_else(|| ValidationError::MalformedEcNumber(number.to_string()))?;

        Ok(Self {
            number: caps[1].to_string(),
            class3: caps[2].to_string(),
            class2: caps[3].to_string(),
            class1: caps[4].to_string(),
        })
    }
}

/// Directly-held functional annotation attributes for a gene product.
///
/// An enormous variety of attributes could go here; these are the ones most
/// often needed in common output formats. The GO and EC collections are
/// always present, possibly empty, and owned per instance.
#[derive(Debug, Clone, Default)]
pub struct FunctionalAnnotation {
    pub product_name: Option<String>,
    pub gene_symbol: Option<String>,
    pub go_annotations: Vec<GoAnnotation>,
    pub ec_numbers: Vec<EcAnnotation>,
}

impl FunctionalAnnotation {
    pub fn new(product_name: Option<String>, gene_symbol: Option<String>) -> Self {
        Self {
            product_name,
            gene_symbol,
            go_annotations: Vec::new(),
            ec_numbers: Vec::new(),
        }
    }

    /// Appends an already-validated GO annotation.
    pub fn add_go_annotation(&mut self, go: GoAnnotation) {
        self.go_annotations.push(go);
    }

    /// Appends an already-validated EC number.
    pub fn add_ec_number(&mut self, ec: EcAnnotation) {
        self.ec_numbers.push(ec);
    }
}
