use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Deed, Encumbrance, Lien, SearchStatus, TitleSearchResult};

/// Renderable projection of a search result. Built by a pure function of the
/// result; record sections appear only when non-empty, entries stay in the
/// order received.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsPanel {
    pub status: SearchStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deeds: Option<RecordSection<DeedView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liens: Option<RecordSection<LienView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encumbrances: Option<RecordSection<EncumbranceView>>,
}

/// One heading plus its entries, e.g. "Deeds (2)".
#[derive(Debug, Clone, Serialize)]
pub struct RecordSection<T> {
    pub heading: String,
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeedView {
    pub deed_type: String,
    pub grantor: String,
    pub grantee: String,
    pub recorded_on: String,
    pub document_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_page: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LienView {
    pub lien_type: String,
    pub creditor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub recorded_on: String,
    pub document_number: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EncumbranceView {
    pub encumbrance_type: String,
    pub description: String,
    pub recorded_on: String,
    pub document_number: String,
}

impl ResultsPanel {
    pub fn render(result: &TitleSearchResult) -> Self {
        Self {
            status: result.status,
            status_label: result.status.label(),
            risk_score: result.risk_score.map(format_risk_score),
            deeds: section("Deeds", result.deeds.iter().map(DeedView::from).collect()),
            liens: section("Liens", result.liens.iter().map(LienView::from).collect()),
            encumbrances: section(
                "Encumbrances",
                result.encumbrances.iter().map(EncumbranceView::from).collect(),
            ),
        }
    }
}

impl From<&Deed> for DeedView {
    fn from(deed: &Deed) -> Self {
        Self {
            deed_type: deed.deed_type.clone(),
            grantor: deed.grantor.clone(),
            grantee: deed.grantee.clone(),
            recorded_on: format_recording_date(deed.recording_date),
            document_number: deed.document_number.clone(),
            book_page: deed.book_page.clone(),
        }
    }
}

impl From<&Lien> for LienView {
    fn from(lien: &Lien) -> Self {
        Self {
            lien_type: lien.lien_type.clone(),
            creditor: lien.creditor.clone(),
            amount: lien.amount.map(format_amount),
            recorded_on: format_recording_date(lien.recording_date),
            document_number: lien.document_number.clone(),
            status: lien.status.clone(),
        }
    }
}

impl From<&Encumbrance> for EncumbranceView {
    fn from(encumbrance: &Encumbrance) -> Self {
        Self {
            encumbrance_type: encumbrance.encumbrance_type.clone(),
            description: encumbrance.description.clone(),
            recorded_on: format_recording_date(encumbrance.recording_date),
            document_number: encumbrance.document_number.clone(),
        }
    }
}

fn section<T>(name: &str, entries: Vec<T>) -> Option<RecordSection<T>> {
    if entries.is_empty() {
        return None;
    }
    Some(RecordSection {
        heading: format!("{name} ({})", entries.len()),
        entries,
    })
}

fn format_recording_date(recorded: DateTime<Utc>) -> String {
    recorded.format("%m/%d/%Y").to_string()
}

fn format_risk_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}/100")
    } else {
        format!("{score:.1}/100")
    }
}

fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let dollars = group_thousands(cents / 100);
    let fraction = cents % 100;
    if fraction == 0 {
        format!("${dollars}")
    } else {
        format!("${dollars}.{fraction:02}")
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

impl fmt::Display for ResultsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Results")?;
        writeln!(f, "Status: {}", self.status_label)?;

        if let Some(risk_score) = &self.risk_score {
            writeln!(f, "Risk Score: {risk_score}")?;
        }

        if let Some(deeds) = &self.deeds {
            writeln!(f, "\n{}", deeds.heading)?;
            for deed in &deeds.entries {
                write!(
                    f,
                    "- {} | {} -> {} | recorded {} | doc {}",
                    deed.deed_type, deed.grantor, deed.grantee, deed.recorded_on,
                    deed.document_number
                )?;
                match &deed.book_page {
                    Some(book_page) => writeln!(f, " | book/page {book_page}")?,
                    None => writeln!(f)?,
                }
            }
        }

        if let Some(liens) = &self.liens {
            writeln!(f, "\n{}", liens.heading)?;
            for lien in &liens.entries {
                write!(f, "- {} | creditor {}", lien.lien_type, lien.creditor)?;
                if let Some(amount) = &lien.amount {
                    write!(f, " | amount {amount}")?;
                }
                writeln!(
                    f,
                    " | recorded {} | doc {} | status {}",
                    lien.recorded_on, lien.document_number, lien.status
                )?;
            }
        }

        if let Some(encumbrances) = &self.encumbrances {
            writeln!(f, "\n{}", encumbrances.heading)?;
            for encumbrance in &encumbrances.entries {
                writeln!(
                    f,
                    "- {} | {} | recorded {} | doc {}",
                    encumbrance.encumbrance_type,
                    encumbrance.description,
                    encumbrance.recorded_on,
                    encumbrance.document_number
                )?;
            }
        }

        Ok(())
    }
}
