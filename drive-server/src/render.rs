//! HTML rendering of directory listings.

use core_service::{Listing, ListingEntry};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;width:100%}\
th,td{text-align:left;padding:.3em .8em}\
tr:nth-child(even){background:#f4f4f4}\
td.size,td.date{white-space:nowrap;color:#555}";

/// Render `listing` as a complete HTML page.
pub fn listing_page(listing: &Listing) -> String {
    let title = html_escape(&listing.current);
    let mut page = String::with_capacity(1024 + listing.entries.len() * 160);

    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>Index of {}</title>\n", title));
    page.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    page.push_str(&format!("<h1>Index of {}</h1>\n", title));
    page.push_str("<table>\n<thead><tr><th>Name</th><th>Size</th><th>Modified</th></tr></thead>\n<tbody>\n");
    page.push_str(&format!(
        "<tr><td><a href=\"{}\">../</a></td><td class=\"size\"></td><td class=\"date\"></td></tr>\n",
        html_escape(&encode_path(&listing.parent))
    ));

    for entry in &listing.entries {
        page.push_str(&entry_row(&listing.current, entry));
    }

    page.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    page
}

fn entry_row(current: &str, entry: &ListingEntry) -> String {
    let marker = if entry.is_folder { "/" } else { "" };
    let size = if entry.is_folder { "-" } else { entry.readable_size.as_str() };

    format!(
        "<tr><td><a href=\"{href}\">{name}{marker}</a></td><td class=\"size\">{size}</td>\
         <td class=\"date\"><time datetime=\"{datetime}\">{date}</time></td></tr>\n",
        href = html_escape(&entry_href(current, entry)),
        name = html_escape(&entry.name),
        marker = marker,
        size = html_escape(size),
        datetime = entry.modified.to_rfc3339(),
        date = html_escape(&entry.readable_date),
    )
}

/// Link target of `entry` inside the folder at `current`. Folders get a
/// trailing `/`.
fn entry_href(current: &str, entry: &ListingEntry) -> String {
    let mut href = encode_path(current.trim_end_matches('/'));
    href.push('/');
    href.push_str(&urlencoding::encode(&entry.name));
    if entry.is_folder {
        href.push('/');
    }
    href
}

/// Percent-encode each segment of `path`, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
