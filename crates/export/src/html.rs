//! Server-rendered HTML page: a date/body form followed by the table of all
//! bodies, the detail list of one body, or an error notice.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use zodiac_chart::{ALL_BODIES, BodyReading, CelestialBody, EphemerisResult};

/// What the page shows below the form.
#[derive(Debug, Clone, Copy)]
pub enum PageContent<'a> {
    Table(&'a EphemerisResult),
    Single(&'a EphemerisResult, &'a BodyReading),
    Error { kind: &'a str, message: &'a str },
}

/// Form state echoed back to the visitor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageContext<'a> {
    pub site_title: &'a str,
    /// Moment preselected in the date picker.
    pub moment: Option<DateTime<Utc>>,
    pub selected_body: Option<CelestialBody>,
}

/// Render a complete HTML document.
pub fn render_page(context: &PageContext<'_>, content: PageContent<'_>) -> String {
    let title = escape(context.site_title);
    let mut page = String::with_capacity(8 * 1024);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{title}</title>");
    page.push_str(STYLE);
    page.push_str("</head>\n<body>\n");
    let _ = writeln!(page, "<h1>{title}</h1>");
    render_form(&mut page, context);

    match content {
        PageContent::Table(result) => render_table(&mut page, result),
        PageContent::Single(result, reading) => render_single(&mut page, result, reading),
        PageContent::Error { kind, message } => {
            let _ = writeln!(
                page,
                "<p class=\"error\"><strong>{}</strong>: {}</p>",
                escape(kind),
                escape(message)
            );
        }
    }

    page.push_str("</body>\n</html>\n");
    page
}

/// `D<sign glyph>M'S"`, with a trailing `r` when retrograde.
pub fn dms(reading: &BodyReading) -> String {
    reading.zodiac.to_string()
}

/// RFC 1123 heading such as `Sat, 01 Jan 2000 12:00:00 GMT`.
pub fn heading_date(moment: &DateTime<Utc>) -> String {
    moment.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const STYLE: &str = "<style>\
body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
td,th{padding:.25em .75em;border-bottom:1px solid #ccc;text-align:left}\
td.num{text-align:right;font-family:monospace}\
.error{color:#a00}\
</style>\n";

fn render_form(page: &mut String, context: &PageContext<'_>) {
    let value = context
        .moment
        .map(|moment| moment.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default();
    page.push_str("<form method=\"get\" action=\"/\">\n");
    let _ = writeln!(
        page,
        "<label>Date (UTC) <input type=\"datetime-local\" name=\"date\" value=\"{}\"></label>",
        escape(&value)
    );
    page.push_str("<label>Body <select name=\"body\">\n<option value=\"\">All bodies</option>\n");
    for body in ALL_BODIES {
        let selected = if context.selected_body == Some(body) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            page,
            "<option value=\"{}\"{selected}>{} {}</option>",
            body.id(),
            body.glyph(),
            body.name()
        );
    }
    page.push_str("</select></label>\n<button type=\"submit\">Calculate</button>\n</form>\n");
}

fn render_table(page: &mut String, result: &EphemerisResult) {
    let _ = writeln!(page, "<h2>{} (UTC)</h2>", heading_date(&result.moment));
    page.push_str(
        "<table>\n<thead><tr><th>Body</th><th>Sign</th><th>Position</th>\
         <th>Longitude</th><th>Speed</th></tr></thead>\n<tbody>\n",
    );
    for reading in &result.readings {
        let _ = writeln!(
            page,
            "<tr><td>{} {}</td><td>{}</td><td>{}</td><td class=\"num\">{:.6}</td><td class=\"num\">{:.6}</td></tr>",
            escape(&reading.name),
            reading.body.glyph(),
            reading.zodiac.sign.name(),
            dms(reading),
            reading.position.longitude,
            reading.position.speed_longitude
        );
    }
    page.push_str("</tbody>\n</table>\n");
}

fn render_single(page: &mut String, result: &EphemerisResult, reading: &BodyReading) {
    let p = &reading.position;
    let _ = writeln!(
        page,
        "<h2>{} {} &middot; {} (UTC)</h2>",
        escape(&reading.name),
        reading.body.glyph(),
        heading_date(&result.moment)
    );
    page.push_str("<ul>\n");
    let _ = writeln!(page, "<li>Sign: {} {}</li>", reading.zodiac.sign.glyph(), reading.zodiac.sign.name());
    let _ = writeln!(page, "<li>Position: {}</li>", dms(reading));
    let _ = writeln!(page, "<li>Longitude: {:.6}</li>", p.longitude);
    let _ = writeln!(page, "<li>Latitude: {:.6}</li>", p.latitude);
    let _ = writeln!(page, "<li>Distance: {:.6} AU</li>", p.distance);
    let _ = writeln!(page, "<li>Speed in longitude: {:.6}</li>", p.speed_longitude);
    let _ = writeln!(page, "<li>Speed in latitude: {:.6}</li>", p.speed_latitude);
    let _ = writeln!(page, "<li>Speed in distance: {:.6}</li>", p.speed_distance);
    let _ = writeln!(page, "<li>Julian Day: {:.6}</li>", result.julian_day.value());
    page.push_str("</ul>\n");
}
