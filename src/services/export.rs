//! Route reports: JSON (re-importable) and a standalone HTML page.

use crate::error::{AppError, Result};
use crate::models::{RouteSnapshot, SavedRoute};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Version written into JSON exports.
const EXPORT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "html" => Ok(ExportFormat::Html),
            "pdf" => Err("PDF export is rendered client-side; request json or html".to_string()),
            _ => Err(format!("Invalid export format: '{}'", s)),
        }
    }
}

/// Which route a report is produced from.
#[derive(Debug, Clone)]
pub enum ExportSource {
    /// The route currently being planned
    InProgress,
    Saved(SavedRoute),
}

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExportEnvelope {
    format_version: u32,
    exported_at: String,
    route: RouteSnapshot,
}

pub fn export(route: &RouteSnapshot, format: ExportFormat) -> Result<ExportedDocument> {
    let body = match format {
        ExportFormat::Json => to_json(route)?,
        ExportFormat::Html => to_html(route),
    };

    Ok(ExportedDocument {
        filename: format!("{}.{}", slugify(&route.name), format.extension()),
        content_type: format.content_type(),
        body,
    })
}

fn to_json(route: &RouteSnapshot) -> Result<String> {
    let envelope = ExportEnvelope {
        format_version: EXPORT_FORMAT_VERSION,
        exported_at: now_rfc3339(),
        route: route.clone(),
    };
    serde_json::to_string_pretty(&envelope)
        .map_err(|e| AppError::Internal(format!("Failed to serialize route: {}", e)))
}

/// Read a JSON export back into a snapshot. A bare snapshot without the
/// export envelope is accepted too.
pub fn import_json(json: &str) -> Result<RouteSnapshot> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let route: RouteSnapshot = match value.get("route") {
        Some(inner) => serde_json::from_value(inner.clone())?,
        None => serde_json::from_value(value)?,
    };

    route.validate().map_err(AppError::InvalidRequest)?;
    Ok(route)
}

fn to_html(route: &RouteSnapshot) -> String {
    let mut html = String::new();
    let title = escape_html(&route.name);

    // Writing into a String never fails
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    if let Some(description) = &route.description {
        let _ = writeln!(html, "<p>{}</p>", escape_html(description));
    }

    let _ = write!(
        html,
        "<table>\n<tr><th>Transport mode</th><td>{}</td></tr>\n\
         <tr><th>Distance</th><td>{:.1} km</td></tr>\n\
         <tr><th>Duration</th><td>{}</td></tr>\n\
         <tr><th>Stops</th><td>{}</td></tr>\n</table>\n",
        route.mode,
        route.distance_m / 1000.0,
        format_duration(route.duration_s),
        route.waypoints.len()
    );

    if route.is_fallback {
        html.push_str(
            "<p class=\"notice\">Distance and duration are straight-line estimates; \
             the routing service was unavailable.</p>\n",
        );
    }

    html.push_str("<ol>\n");
    for wp in &route.waypoints {
        let _ = writeln!(
            html,
            "<li><strong>{}</strong> ({}) {:.5}, {:.5}</li>",
            escape_html(&wp.name),
            escape_html(&wp.category),
            wp.coordinates.lat,
            wp.coordinates.lng
        );
    }
    html.push_str("</ol>\n");

    let _ = write!(html, "<footer>Exported {}</footer>\n</body>\n</html>\n", now_rfc3339());
    html
}

/// "2 h 05 min", or "45 min" under an hour.
pub fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds / 60.0).round() as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours == 0 {
        format!("{} min", minutes)
    } else {
        format!("{} h {:02} min", hours, minutes)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "route".to_string()
    } else {
        slug.to_string()
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
