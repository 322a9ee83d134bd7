//! HTML report rendering.
//!
//! Typed rows in, page strings out. Every page shares the same chrome
//! (navigation bar plus a small inline stylesheet); tables are built
//! through a single generic renderer so the reports stay uniform. All
//! cell text is HTML-escaped.

use chrono::Local;

use crate::analysis::{HeadToHeadRecord, RecordEntry};
use crate::data_fetcher::models::{DraftPickRow, MatchupRow, TeamSeasonRow};

/// A row type that can render itself into an HTML report table.
pub trait TableRow {
    const HEADERS: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

/// Escapes text for safe embedding in HTML element content and
/// attribute values.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats a statistic value: whole numbers without a decimal point,
/// fractional scores as reported.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

impl TableRow for MatchupRow {
    const HEADERS: &'static [&'static str] = &[
        "Year",
        "Week",
        "Home Owners",
        "Home Score",
        "Away Owners",
        "Away Score",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.week.to_string(),
            self.home_owners.clone(),
            format_value(self.home_score),
            self.away_owners.clone(),
            format_value(self.away_score),
        ]
    }
}

impl TableRow for TeamSeasonRow {
    const HEADERS: &'static [&'static str] = &[
        "Year",
        "Owners",
        "Division",
        "Wins",
        "Losses",
        "Points For",
        "Points Against",
        "Acquisitions",
        "Drops",
        "Trades",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.owners.clone(),
            self.division_name.clone(),
            self.wins.to_string(),
            self.losses.to_string(),
            format_value(self.points_for),
            format_value(self.points_against),
            self.acquisitions.to_string(),
            self.drops.to_string(),
            self.trades.to_string(),
        ]
    }
}

impl TableRow for HeadToHeadRecord {
    const HEADERS: &'static [&'static str] = &["Owner", "Opponent", "Wins", "Losses"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.owner.clone(),
            self.opponent.clone(),
            self.wins.to_string(),
            self.losses.to_string(),
        ]
    }
}

impl TableRow for RecordEntry {
    const HEADERS: &'static [&'static str] = &["Record", "Value", "Owners", "Year", "Week"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.statistic.clone(),
            format_value(self.value),
            self.owners.clone(),
            self.year.to_string(),
            self.week.map(|w| w.to_string()).unwrap_or_default(),
        ]
    }
}

impl TableRow for DraftPickRow {
    const HEADERS: &'static [&'static str] = &[
        "Year",
        "Pick #",
        "Round Pick #",
        "Owner",
        "Previous Owner(s)",
        "Pick",
        "Team",
        "Pos.",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.pick_number.clone(),
            self.round_pick_number.clone(),
            self.owner.clone(),
            self.previous_owners.clone(),
            self.pick.clone(),
            self.team.clone(),
            self.position.clone(),
        ]
    }
}

/// Renders a table of rows, or a placeholder paragraph when there is
/// nothing to show.
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "<p class=\"empty\">No data to display.</p>".to_string();
    }

    let mut html = String::from("<table class=\"data\">\n<tr>");
    for header in T::HEADERS {
        html.push_str("<th>");
        html.push_str(&html_escape(header));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row.cells() {
            html.push_str("<td>");
            html.push_str(&html_escape(&cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }\n\
nav a { margin-right: 1em; }\n\
table.data { border-collapse: collapse; margin-top: 1em; }\n\
table.data th, table.data td { border: 1px solid #999; padding: 4px 10px; }\n\
table.data th { background: #eee; }\n\
form { margin-top: 1em; }\n";

/// Wraps page content in the shared chrome: title, stylesheet and the
/// report navigation bar.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> <a href=\"/box_scores\">Box Scores</a> \
         <a href=\"/teams\">Teams</a> <a href=\"/records\">Records</a> \
         <a href=\"/head_to_head\">Head to Head</a> <a href=\"/draft_data\">Draft History</a></nav>\n\
         <h1>{title}</h1>\n{body}\n\
         <footer><small>Generated {generated}</small></footer>\n</body>\n</html>\n",
        title = html_escape(title),
        body = body,
        generated = Local::now().format("%Y-%m-%d %H:%M"),
    )
}

/// A single-select year form posting back to `action`. An empty first
/// option means "all years" where the route supports it.
pub fn year_form(action: &str, years: impl Iterator<Item = i32>) -> String {
    let mut form = format!(
        "<form method=\"post\" action=\"{}\">\n<label>Year: <select name=\"year\">\n<option value=\"\"></option>\n",
        html_escape(action)
    );
    for year in years {
        form.push_str(&format!("<option value=\"{year}\">{year}</option>\n"));
    }
    form.push_str("</select></label>\n<button type=\"submit\">Show</button>\n</form>");
    form
}

/// A single-select owner form posting back to `action`.
pub fn owner_form(action: &str, owners: &[String]) -> String {
    let mut form = format!(
        "<form method=\"post\" action=\"{}\">\n<label>Owner: <select name=\"owner\">\n<option value=\"\"></option>\n",
        html_escape(action)
    );
    for owner in owners {
        let escaped = html_escape(owner);
        form.push_str(&format!("<option value=\"{escaped}\">{escaped}</option>\n"));
    }
    form.push_str("</select></label>\n<button type=\"submit\">Show</button>\n</form>");
    form
}

/// Landing page: season window and the owner roster.
pub fn index_page(years: impl Iterator<Item = i32>, owners: &[String]) -> String {
    let years: Vec<String> = years.map(|y| y.to_string()).collect();
    let mut body = format!("<p>Seasons covered: {}</p>\n<h2>Owners</h2>\n<ul>\n", years.join(", "));
    for owner in owners {
        body.push_str(&format!("<li>{}</li>\n", html_escape(owner)));
    }
    body.push_str("</ul>");
    page("League Dashboard", &body)
}

pub fn box_scores_page(rows: &[MatchupRow], years: impl Iterator<Item = i32>) -> String {
    let body = format!(
        "{}\n{}",
        year_form("/box_scores", years),
        render_table(rows)
    );
    page("Box Scores", &body)
}

pub fn teams_page(rows: &[TeamSeasonRow], years: impl Iterator<Item = i32>) -> String {
    let body = format!("{}\n{}", year_form("/teams", years), render_table(rows));
    page("Team Records", &body)
}

pub fn records_page(entries: &[RecordEntry]) -> String {
    page("League Records", &render_table(entries))
}

pub fn head_to_head_page(rows: &[HeadToHeadRecord], owners: &[String]) -> String {
    let body = format!(
        "{}\n{}",
        owner_form("/head_to_head", owners),
        render_table(rows)
    );
    page("Head to Head", &body)
}

pub fn draft_page(rows: &[DraftPickRow], years: impl Iterator<Item = i32>) -> String {
    let body = format!(
        "{}\n{}",
        year_form("/draft_data", years),
        render_table(rows)
    );
    page("Draft History", &body)
}
