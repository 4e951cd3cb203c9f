//! Classifier for the free-text process-type column.
//!
//! Two tiers, both evaluated in a fixed order with first match winning:
//! regex rules catch natural-language variants (plurals, spacing, stray
//! punctuation), then a literal prefix table catches short or truncated
//! entries the regexes miss. Regexes run first because they are the more
//! specific tier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::fold;

/// Fixed taxonomy of agreement modalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "Amendment")]
    Amendment,
    #[serde(rename = "Partnership Agreement")]
    PartnershipAgreement,
    #[serde(rename = "Cooperation Agreement")]
    CooperationAgreement,
    #[serde(rename = "Co-supervision Agreement")]
    CoSupervisionAgreement,
    #[serde(rename = "Memorandum of Understanding (MoU)")]
    MemorandumOfUnderstanding,
    #[serde(rename = "Protocol of Intentions")]
    ProtocolOfIntentions,
    #[serde(rename = "Internship Agreement")]
    InternshipAgreement,
    #[serde(rename = "Covenant")]
    Covenant,
    #[serde(rename = "Cooperation Term")]
    CooperationTerm,
    #[serde(rename = "Adhesion Term")]
    AdhesionTerm,
    #[serde(rename = "Partnership Term")]
    PartnershipTerm,
    #[serde(rename = "Invitation Letter")]
    InvitationLetter,
    #[serde(rename = "Certificate Issuance")]
    CertificateIssuance,
    #[serde(rename = "Scientific Expedition")]
    ScientificExpedition,
    #[serde(rename = "Project")]
    Project,
    #[serde(rename = "Other")]
    Other,
}

impl Modality {
    pub const ALL: [Modality; 16] = [
        Modality::Amendment,
        Modality::PartnershipAgreement,
        Modality::CooperationAgreement,
        Modality::CoSupervisionAgreement,
        Modality::MemorandumOfUnderstanding,
        Modality::ProtocolOfIntentions,
        Modality::InternshipAgreement,
        Modality::Covenant,
        Modality::CooperationTerm,
        Modality::AdhesionTerm,
        Modality::PartnershipTerm,
        Modality::InvitationLetter,
        Modality::CertificateIssuance,
        Modality::ScientificExpedition,
        Modality::Project,
        Modality::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Modality::Amendment => "Amendment",
            Modality::PartnershipAgreement => "Partnership Agreement",
            Modality::CooperationAgreement => "Cooperation Agreement",
            Modality::CoSupervisionAgreement => "Co-supervision Agreement",
            Modality::MemorandumOfUnderstanding => "Memorandum of Understanding (MoU)",
            Modality::ProtocolOfIntentions => "Protocol of Intentions",
            Modality::InternshipAgreement => "Internship Agreement",
            Modality::Covenant => "Covenant",
            Modality::CooperationTerm => "Cooperation Term",
            Modality::AdhesionTerm => "Adhesion Term",
            Modality::PartnershipTerm => "Partnership Term",
            Modality::InvitationLetter => "Invitation Letter",
            Modality::CertificateIssuance => "Certificate Issuance",
            Modality::ScientificExpedition => "Scientific Expedition",
            Modality::Project => "Project",
            Modality::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Modality> {
        Modality::ALL.iter().copied().find(|m| m.label() == label)
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Tier 1: ordered regex rules over folded text. Order is load-bearing:
// "termo aditivo" must win before the generic "termo de ..." rules, and the
// specific "convenio de estagio" before the bare "convenio".
static RULES: Lazy<Vec<(Regex, Modality)>> = Lazy::new(|| {
    let rules: &[(&str, Modality)] = &[
        (r"\btermo\s+ad[it]+[iv]*o\b", Modality::Amendment),
        (r"\bacordo[s]?\s+(de\s+)?parceria[s]?\b", Modality::PartnershipAgreement),
        (r"\bacordo[s]?\s+de\s+cooperacao\b", Modality::CooperationAgreement),
        (r"\bacordo[s]?\s+de\s+co\s?tutela\b", Modality::CoSupervisionAgreement),
        (r"\bmemorando\s+de\s+entendimento[s]?\b", Modality::MemorandumOfUnderstanding),
        (r"\bm[\s.]*o[\s.]*u\b", Modality::MemorandumOfUnderstanding),
        (r"\bprotocolo\s+de\s+intenc(ao|oes)\b", Modality::ProtocolOfIntentions),
        (r"\bconve?nio\s+de\s+esta?gio\b", Modality::InternshipAgreement),
        (r"\bconve?nio[s]?\b", Modality::Covenant),
        (r"\btermo\s+de\s+cooperacao\b", Modality::CooperationTerm),
        (r"\btermo\s+de\s+adesao\b", Modality::AdhesionTerm),
        (r"\btermo\s+de\s+parceria\b", Modality::PartnershipTerm),
        (r"\bcarta[\s\-/]*convite\b", Modality::InvitationLetter),
        (r"\bexpedicao\s+de\s+certidao\b", Modality::CertificateIssuance),
        (r"\bexpedicao\s+cientifica\b", Modality::ScientificExpedition),
        (r"\bprojeto[s]?\b", Modality::Project),
    ];
    rules
        .iter()
        .map(|(pat, m)| (Regex::new(pat).expect("modality rule pattern"), *m))
        .collect()
});

// Tier 2: literal prefixes for short or truncated entries, including known
// source typos ("termo adtivo").
const PREFIXES: &[(&str, Modality)] = &[
    ("termo aditivo", Modality::Amendment),
    ("termo adtivo", Modality::Amendment),
    ("acordo parceria", Modality::PartnershipAgreement),
    ("acordo de parceria", Modality::PartnershipAgreement),
    ("acordo de cooperacao", Modality::CooperationAgreement),
    ("acordo de cotutela", Modality::CoSupervisionAgreement),
    ("acordo de co tutela", Modality::CoSupervisionAgreement),
    ("memorando de entendimento", Modality::MemorandumOfUnderstanding),
    ("protocolo de intencoes", Modality::ProtocolOfIntentions),
    ("convenio de estagio", Modality::InternshipAgreement),
    ("convenio", Modality::Covenant),
    ("termo de cooperacao", Modality::CooperationTerm),
    ("termo de adesao", Modality::AdhesionTerm),
    ("termo de parceria", Modality::PartnershipTerm),
    ("carta convite", Modality::InvitationLetter),
    ("expedicao de certidao", Modality::CertificateIssuance),
    ("expedicao cientifica", Modality::ScientificExpedition),
    ("projeto", Modality::Project),
];

static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_/]+").unwrap());

/// Classify a raw process-type string. Total: unmatched or blank input is
/// `Modality::Other`.
pub fn classify_modality(raw: Option<&str>) -> Modality {
    let s = match raw {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Modality::Other,
    };
    let s = fold(&PUNCT.replace_all(s, " "));

    for (re, modality) in RULES.iter() {
        if re.is_match(&s) {
            return *modality;
        }
    }
    for (prefix, modality) in PREFIXES {
        if s.starts_with(prefix) {
            return *modality;
        }
    }
    Modality::Other
}
