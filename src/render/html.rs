// HTML report: upload page, result fragment, error box
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write as _;

use super::cloud_raster::CloudImage;
use crate::pipeline::Analysis;
use crate::types::RankedEntry;

pub const PAGE_TITLE: &str = "PDF Text Visualizer";
pub const UPLOAD_PROMPT: &str = "Please upload a PDF file to visualize its text.";

/// Rendered visual artifacts for one analysis.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub cloud: CloudImage,
    pub scatter_svg: String,
    pub line_svg: String,
}

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0 auto; max-width: 1200px; padding: 1.5rem; color: #262730; }
h1 { margin-top: 0; }
h2 { margin-top: 2rem; border-bottom: 1px solid #e6e6e6; padding-bottom: .3rem; }
.info { background: #e8f0fe; color: #1c4e9c; padding: .8rem 1rem; border-radius: .4rem; }
.error { background: #fde8e8; color: #9b1c1c; padding: .8rem 1rem; border-radius: .4rem; }
.loading { color: #666; font-style: italic; }
.summary p { margin: .2rem 0; }
pre.preview { white-space: pre-wrap; background: #f6f6f6; padding: 1rem; max-height: 24rem; overflow: auto; }
img.cloud { max-width: 100%; height: auto; border: 1px solid #eee; }
svg.chart { width: 100%; height: auto; }
svg.chart circle.pt:hover { fill-opacity: 1; r: 6; }
.table-wrap { max-height: 32rem; overflow: auto; border: 1px solid #e6e6e6; }
table.freq { border-collapse: collapse; width: 100%; }
table.freq th, table.freq td { padding: .3rem .8rem; border-bottom: 1px solid #f0f0f0; text-align: left; }
table.freq th { position: sticky; top: 0; background: #fafafa; cursor: pointer; user-select: none; }
table.freq td.num { text-align: right; font-variant-numeric: tabular-nums; }
"#;

const SCRIPT: &str = r#"
document.addEventListener('click', function (e) {
  var th = e.target.closest('th[data-col]');
  if (!th) return;
  var table = th.closest('table');
  var body = table.tBodies[0];
  var col = +th.dataset.col;
  var numeric = th.dataset.type === 'num';
  var asc = th.dataset.dir !== 'asc';
  Array.prototype.forEach.call(table.querySelectorAll('th'), function (h) { delete h.dataset.dir; });
  th.dataset.dir = asc ? 'asc' : 'desc';
  var rows = Array.prototype.slice.call(body.rows);
  rows.sort(function (a, b) {
    var x = a.cells[col].textContent, y = b.cells[col].textContent;
    var c = numeric ? (+x - +y) : x.localeCompare(y);
    return asc ? c : -c;
  });
  rows.forEach(function (r) { body.appendChild(r); });
});
var input = document.getElementById('pdf');
if (input) {
  input.addEventListener('change', function () {
    var out = document.getElementById('results');
    var file = input.files[0];
    if (!file) { out.innerHTML = '<p class="info">' + out.dataset.prompt + '</p>'; return; }
    out.innerHTML = '<p class="loading">Processing ' + file.name.replace(/</g, '&lt;') + '...</p>';
    fetch('/report', { method: 'POST', headers: { 'Content-Type': 'application/pdf', 'X-File-Name': encodeURIComponent(file.name) }, body: file })
      .then(function (r) { return r.text(); })
      .then(function (html) { out.innerHTML = html; })
      .catch(function (err) { out.innerHTML = '<p class="error">Upload failed: ' + err + '</p>'; });
  });
}
"#;

/// Wrap a body in a complete HTML document.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n<script>{}</script>\n</body>\n</html>\n",
        text(title),
        STYLE,
        body,
        SCRIPT
    )
}

pub fn upload_page() -> String {
    let body = format!(
        r#"<h1>📑 PDF Text Visualization</h1>
<label for="pdf">Upload a PDF file</label><br>
<input type="file" id="pdf" name="pdf" accept="application/pdf,.pdf">
<div id="results" data-prompt="{prompt}"><p class="info">{prompt}</p></div>"#,
        prompt = attr(UPLOAD_PROMPT)
    );
    page(PAGE_TITLE, &body)
}

pub fn error_fragment(message: &str) -> String {
    format!(r#"<p class="error">{}</p>"#, text(message))
}

/// The result sections, in display order.
pub fn result_fragment(analysis: &Analysis, artifacts: &Artifacts) -> String {
    let mut html = String::new();
    let summary = &analysis.summary;

    let _ = write!(
        html,
        r#"<section class="summary"><h2>Summary</h2><p><b>Total Words:</b> {}</p><p><b>Unique Words:</b> {}</p><p><b>Pages:</b> {} ({} with text)</p></section>"#,
        summary.total_words, summary.unique_words, summary.page_count, summary.readable_pages
    );

    let _ = write!(
        html,
        r#"<details><summary>Preview Extracted Text</summary><pre class="preview">{}</pre></details>"#,
        text(&analysis.preview.display())
    );

    let _ = write!(
        html,
        r#"<section><h2>☁ Word Cloud</h2><img class="cloud" alt="Word cloud of {}" src="{}"></section>"#,
        attr(&analysis.source),
        artifacts.cloud.to_data_uri()
    );

    let _ = write!(
        html,
        r#"<section><h2>📈 Scatter Plot (Word Rank vs Frequency)</h2>{}</section>"#,
        artifacts.scatter_svg
    );
    let _ = write!(
        html,
        r#"<section><h2>📊 Line Chart (Frequency Distribution)</h2>{}</section>"#,
        artifacts.line_svg
    );

    html.push_str(r#"<section><h2>📋 Word Frequency Table</h2>"#);
    html.push_str(&frequency_table(&analysis.ranked));
    html.push_str("</section>");
    html
}

pub fn frequency_table(ranked: &[RankedEntry]) -> String {
    let mut html = String::with_capacity(64 * ranked.len() + 256);
    html.push_str(
        r#"<div class="table-wrap"><table class="freq"><thead><tr><th data-col="0">Word</th><th data-col="1" data-type="num">Count</th><th data-col="2" data-type="num">Rank</th></tr></thead><tbody>"#,
    );
    for entry in ranked {
        let _ = write!(
            html,
            r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
            text(&entry.word),
            entry.count,
            entry.rank
        );
    }
    html.push_str("</tbody></table></div>");
    html
}

/// Self-contained report file, used by the CLI.
pub fn standalone_report(analysis: &Analysis, artifacts: &Artifacts) -> String {
    let body = format!(
        "<h1>📑 PDF Text Visualization</h1>\n<p class=\"info\">{} &middot; generated {}</p>\n{}",
        text(&analysis.source),
        analysis.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        result_fragment(analysis, artifacts)
    );
    page(&format!("{} - {}", PAGE_TITLE, analysis.source), &body)
}
