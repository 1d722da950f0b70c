//! Bulk invite import
//!
//! Text format: one `<student_id> <student_name...>` per line.

use tracing::{info, instrument, warn};

use crate::dto::{ImportLineResult, ImportResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::invite::InviteService;

/// One parsed import line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    pub student_id: String,
    pub student_name: String,
}

/// Parse import text.
///
/// The first whitespace-separated token is the student id and the rest,
/// joined by single spaces, is the name. Lines with fewer than two tokens are
/// dropped.
pub fn parse_import_text(text: &str) -> Vec<ImportLine> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let student_id = tokens.next()?;
            let student_name = tokens.collect::<Vec<_>>().join(" ");
            if student_name.is_empty() {
                return None;
            }
            Some(ImportLine {
                student_id: student_id.to_string(),
                student_name,
            })
        })
        .collect()
}

/// Import service
pub struct ImportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ImportService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create one invite per line. A failing line is reported in its result
    /// and the remaining lines still run.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub async fn import(&self, text: &str) -> ServiceResult<ImportResponse> {
        let invites = InviteService::new(self.ctx);
        let mut results = Vec::new();

        for line in parse_import_text(text) {
            let result = match invites
                .create_invite(&line.student_id, &line.student_name)
                .await
            {
                Ok(code) => ImportLineResult {
                    student_id: line.student_id,
                    student_name: line.student_name,
                    success: true,
                    code: Some(code),
                    message: None,
                },
                Err(e) => {
                    warn!(student_id = %line.student_id, error = %e, "Import line failed");
                    ImportLineResult {
                        student_id: line.student_id,
                        student_name: line.student_name,
                        success: false,
                        code: None,
                        message: Some(e.to_string()),
                    }
                }
            };
            results.push(result);
        }

        let response = ImportResponse::new(results);
        info!(
            succeeded = response.succeeded,
            failed = response.failed,
            "Invite import finished"
        );
        Ok(response)
    }
}
