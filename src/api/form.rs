//! The single-page HTML form.

pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL.";
pub const FAILURE_MESSAGE: &str =
    "Could not generate summary. The URL may be invalid or the site could not be scraped.";

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Webpage Summarizer</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 2em; background: #f9f9f9; }
        .container { max-width: 600px; margin: auto; background: #fff; padding: 2em; border-radius: 8px; box-shadow: 0 2px 8px #0001; }
        input[type=url] { width: 100%; padding: 0.5em; font-size: 1em; }
        button { padding: 0.5em 1.5em; font-size: 1em; margin-top: 1em; }
        .summary { margin-top: 2em; background: #f4f4f4; padding: 1em; border-radius: 6px; }
        .error { color: #b00; margin-top: 1em; }
        #processing-message { display: none; color: #0074d9; margin-top: 1em; }
    </style>
    <script>
        document.addEventListener('DOMContentLoaded', function() {
            var form = document.querySelector('form');
            var processing = document.getElementById('processing-message');
            if (form && processing) {
                form.addEventListener('submit', function() {
                    processing.style.display = 'block';
                });
            }
        });
    </script>
</head>
<body>
    <div class="container">
        <h1>Webpage Summarizer</h1>
"#;

const PAGE_TAIL: &str = "    </div>\n</body>\n</html>\n";

/// Renders the form with the submitted URL echoed back and, at most, one of
/// a summary or an error. Every interpolated value is escaped.
pub fn render_page(url: &str, summary: Option<&str>, error: Option<&str>) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + 1024 + summary.map_or(0, str::len));
    page.push_str(PAGE_HEAD);

    page.push_str("        <form method=\"post\">\n");
    page.push_str("            <label for=\"url\">Enter a URL to summarize:</label><br>\n");
    page.push_str("            <input type=\"url\" id=\"url\" name=\"url\" required placeholder=\"https://example.com\" value=\"");
    page.push_str(&escape_html(url));
    page.push_str("\"><br>\n");
    page.push_str("            <button type=\"submit\">Summarize</button>\n");
    page.push_str("        </form>\n");
    page.push_str("        <div id=\"processing-message\">Processing... Please wait.</div>\n");

    if let Some(error) = error {
        page.push_str("        <div class=\"error\">");
        page.push_str(&escape_html(error));
        page.push_str("</div>\n");
    }

    if let Some(summary) = summary {
        page.push_str("        <div class=\"summary\">\n            <h2>Summary</h2>\n");
        page.push_str("            <pre style=\"white-space: pre-wrap;\">");
        page.push_str(&escape_html(summary));
        page.push_str("</pre>\n        </div>\n");
    }

    page.push_str(PAGE_TAIL);
    page
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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
