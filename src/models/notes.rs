use crate::error::{Error, Result};
use crate::models::common::{HasSelfLink, SELF_REL};
use crate::rest::RestContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    SpecialRequest,
    Amendment,
    Diet,
    Medical,
    CustomerFeedback,
    Complaint,
    ChildCare,
    TermsAndConditions,
    Insurance,
    AccessCode,
    ArrivalTime,
    Generic,
    FlightNotes,
    FlightNotesManual,
    Membership,
    EveOfDeparture,
    FinalDocuments,
    SailingQualification,
    Representative,
    CreditControl,
    PassportAndVisaInformation,
    ImportantInformation,
    Recommended,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Note {
    #[serde(rename = "Type")]
    pub note_type: NoteType,
    pub title: String,
    pub text: String,
}

impl Note {
    pub fn new(note_type: NoteType, title: impl Into<String>, text: impl Into<String>) -> Self {
        Note {
            note_type,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Notes on any resource exposing a `self` link.
///
/// The notes collection lives at `{self}/notes`. Resources that have no notes
/// collection answer 404, which is reported as [`Error::Unsupported`].
#[derive(Debug, Clone, Copy)]
pub struct NotesApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> NotesApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        NotesApi { ctx }
    }

    /// Notes attached to a resource
    pub async fn list<R>(&self, resource: &R) -> Result<Vec<Note>>
    where
        R: HasSelfLink + ?Sized,
    {
        let href = notes_href(resource)?;
        self.ctx
            .get(&href)
            .await
            .map_err(|e| unsupported_on_404(e, &href))
    }

    /// Attach a note to a resource
    pub async fn add<R>(&self, resource: &R, note: &Note) -> Result<Note>
    where
        R: HasSelfLink + ?Sized,
    {
        let href = notes_href(resource)?;
        self.ctx
            .post(&href, note)
            .await
            .map_err(|e| unsupported_on_404(e, &href))
    }
}

fn notes_href<R: HasSelfLink + ?Sized>(resource: &R) -> Result<String> {
    let link = resource.self_link().ok_or_else(|| Error::MissingLink {
        rel: SELF_REL.to_string(),
    })?;
    Ok(format!("{}/notes", link.href.trim_end_matches('/')))
}

fn unsupported_on_404(error: Error, href: &str) -> Error {
    if error.is_not_found() {
        debug!(message = "Resource has no notes collection", href);
        Error::Unsupported {
            href: href.to_string(),
        }
    } else {
        error
    }
}
