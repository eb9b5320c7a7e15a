//! HTML templates for the recommendation page
//!
//! 單一頁面：輸入欄、按鈕、四個結果分頁。分頁純 CSS，送出時用一行 JS 顯示等待訊息。

use crate::core::roster::Recommendations;
use crate::utils::error::CrewError;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use url::Url;

const STYLE_CSS: &str = r#"
:root {
    --bg: #fafafa;
    --card: #ffffff;
    --text: #262730;
    --muted: #6b6c76;
    --accent: #ff4b4b;
    --border: #e6e6ea;
    --error-bg: #ffecec;
    --info-bg: #e8f1fb;
}
* { box-sizing: border-box; }
body {
    font-family: "Source Sans Pro", system-ui, sans-serif;
    background: var(--bg);
    color: var(--text);
    margin: 0;
    line-height: 1.6;
}
main { max-width: 760px; margin: 0 auto; padding: 48px 20px; }
h1 { font-size: 2em; margin: 0 0 8px; }
.intro { color: var(--muted); margin-bottom: 24px; }
label.field { display: block; font-size: 0.9em; margin-bottom: 6px; }
input[type="text"] {
    width: 100%;
    padding: 10px 12px;
    border: 1px solid var(--border);
    border-radius: 6px;
    font-size: 1em;
}
button {
    margin-top: 12px;
    padding: 8px 16px;
    border: 1px solid var(--accent);
    background: var(--card);
    color: var(--accent);
    border-radius: 6px;
    cursor: pointer;
}
button:disabled { opacity: 0.5; cursor: not-allowed; }
.notice { border-radius: 6px; padding: 12px 16px; margin-top: 20px; white-space: pre-wrap; }
.notice.error { background: var(--error-bg); }
.notice.info { background: var(--info-bg); }
.busy { color: var(--muted); margin-top: 16px; }
.tabs { display: flex; flex-wrap: wrap; margin-top: 28px; border-bottom: 1px solid var(--border); }
.tabs > input { display: none; }
.tabs > label.tab { order: 1; padding: 8px 14px; cursor: pointer; color: var(--muted); }
.tabs > .panel { order: 2; width: 100%; display: none; padding: 16px 4px; background: var(--bg); }
.tabs > input:checked + label.tab { color: var(--accent); border-bottom: 2px solid var(--accent); }
.tabs > input:checked + label.tab + .panel { display: block; }
"#;

const BUSY_SCRIPT: &str = "var b=document.getElementById('busy');\
b.textContent='Our specialists are analysing the profile \\''+this.lifestyle.value+'\\'...';\
b.hidden=false;";

/// 整頁外框
pub fn page_html(lifestyle: &str, form_enabled: bool, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Lifestyle Agent</title>
<style>{style}</style>
</head>
<body>
<main>
<h1>🛍️ Lifestyle Shopping Agent</h1>
<p class="intro">Describe your lifestyle (or hobby) and our AI agents will recommend the essential products for you.</p>
<form method="post" action="/" onsubmit="{script}">
<label class="field" for="lifestyle">Your lifestyle</label>
<input type="text" id="lifestyle" name="lifestyle" value="{value}" placeholder="e.g. Hiker, Gamer, Weekend chef, Minimalist, Pet parent">
<button type="submit"{disabled}>Generate recommendations</button>
</form>
<p id="busy" class="busy" hidden></p>
{content}
</main>
</body>
</html>"#,
        style = STYLE_CSS,
        script = html_escape(BUSY_SCRIPT),
        value = html_escape(lifestyle),
        disabled = if form_enabled { "" } else { " disabled" },
        content = content,
    )
}

/// 未設定金鑰：錯誤訊息加上設定說明
pub fn missing_key_html(error: &CrewError) -> String {
    format!(
        "<div class=\"notice error\">{}</div>\n<div class=\"notice info\">{}</div>",
        html_escape(&error.user_friendly_message()),
        html_escape(&error.recovery_suggestion())
    )
}

pub fn error_html(error: &CrewError) -> String {
    format!(
        "<div class=\"notice error\">{}</div>",
        html_escape(&error.user_friendly_message())
    )
}

/// 四個分頁，第一個預設展開
pub fn results_html(recommendations: &Recommendations) -> String {
    let mut out = String::from("<div class=\"tabs\">\n");

    for (index, (specialist, text)) in recommendations.sections().iter().enumerate() {
        let key = specialist.key();
        out.push_str(&format!(
            "<input type=\"radio\" name=\"result-tabs\" id=\"tab-{key}\"{checked}>\n\
             <label class=\"tab\" for=\"tab-{key}\">{label}</label>\n\
             <section class=\"panel\" id=\"panel-{key}\">\n{body}</section>\n",
            key = key,
            checked = if index == 0 { " checked" } else { "" },
            label = specialist.tab_label(),
            body = markdown_to_html(text),
        ));
    }

    out.push_str("</div>");
    out
}

/// 模型輸出當 Markdown 渲染；內嵌的原始 HTML 一律當成文字，不安全的連結改成 `#`
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// 只放行 http/https/mailto 與相對路徑
fn safe_url(dest: CowStr<'_>) -> CowStr<'_> {
    let allowed = match Url::parse(&dest) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "mailto"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    };

    if allowed {
        dest
    } else {
        tracing::warn!("⚠️ Dropped unsafe link target in model output");
        CowStr::Borrowed("#")
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
