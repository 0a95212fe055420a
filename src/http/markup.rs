use std::borrow::Cow;
use std::fmt::Write as _;

use crate::gallery::card::{CardPreview, VideoCard};
use crate::gallery::grid::RevealGrid;
use crate::gallery::style::CardStyle;
use crate::player::controller::PlayerState;
use crate::player::time::bar_width_percent;

const STYLESHEET: &str = r#"
body{margin:0;min-height:100vh;background:linear-gradient(#111827,#000);color:#fff;font-family:system-ui,sans-serif}
header{padding:1rem 1.5rem}header a{color:#fff;text-decoration:none}
main{max-width:80rem;margin:0 auto;padding:1.5rem}
.grid{display:grid;gap:1.5rem}.grid-compact{grid-template-columns:repeat(5,1fr)}.grid-comfortable{grid-template-columns:repeat(3,1fr)}
.card{display:block;border-radius:1rem;overflow:hidden;background:#1f2937;color:inherit;text-decoration:none}
.card-media{position:relative;aspect-ratio:16/9;overflow:hidden}
.card-media img,.card-media video{width:100%;height:100%;object-fit:cover;transition:transform var(--transition,300ms)}
.card:hover .card-media img{transform:scale(var(--hover-scale,1.05))}
.card-body{padding:1.5rem}.card-body .date{color:#9ca3af;font-size:.875rem}
.spinner{position:absolute;inset:0;margin:auto;width:2.5rem;height:2.5rem;border:4px solid #3b82f633;border-top-color:#3b82f6;border-radius:50%;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
.sentinel{grid-column:1/-1;display:flex;justify-content:center;padding:2rem 0}
.player{position:relative;max-width:72rem;margin:0 auto;border-radius:1rem;overflow:hidden;background:#000}
.player video{display:block;width:100%;aspect-ratio:16/9;background:#000}
.controls{padding:1rem 1.5rem;display:flex;gap:1rem;align-items:center}
.scrub{flex:1;height:.375rem;background:#ffffff33;border-radius:999px;cursor:pointer;overflow:hidden}
.scrub-fill{height:100%;background:#3b82f6}
.player-error{padding:3rem;text-align:center;color:#f87171}
"#;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// Wrap `body` in the shared page shell.
///
/// `hints` are URLs the preload worker has already hinted; each becomes a
/// `<link rel="preload" as="video">` in the head.
pub fn layout(site_title: &str, page_title: Option<&str>, hints: &[String], body: &str) -> String {
    let title = match page_title {
        Some(t) => format!("{} · {}", escape(t), escape(site_title)),
        None => escape(site_title).into_owned(),
    };
    let mut head_links = String::new();
    for url in hints {
        let _ = write!(
            head_links,
            r#"<link rel="preload" as="video" href="{}">"#,
            escape(url)
        );
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head_links}
<style>{css}</style>
</head>
<body>
<header><a href="/"><h1>{site}</h1></a></header>
<main>
{body}
</main>
<script src="/static/gallery.js" defer></script>
</body>
</html>"#,
        title = title,
        head_links = head_links,
        css = STYLESHEET,
        site = escape(site_title),
        body = body,
    )
}

/// A single preview tile.
pub fn card(card: &VideoCard, style: &CardStyle) -> String {
    let record = card.record();
    let spinner = if card.is_loading() {
        r#"<div class="spinner" data-role="loading"></div>"#
    } else {
        ""
    };
    let media = match card.preview() {
        CardPreview::Image { src } => format!(
            r#"<img src="{}" alt="{}">"#,
            escape(src),
            escape(&record.title)
        ),
        CardPreview::Live { src, .. } => format!(
            r#"<video src="{}" muted playsinline preload="metadata" data-capture-thumbnail></video>"#,
            escape(src)
        ),
    };
    format!(
        r#"<a class="card" href="{href}" style="--hover-scale:{scale};--transition:{ms}ms"><div class="card-media">{spinner}{media}</div><div class="card-body"><h3>{title}</h3><p>{description}</p><p class="date">{date}</p></div></a>"#,
        href = escape(&card.href()),
        scale = style.hover_scale(),
        ms = style.transition_ms(),
        spinner = spinner,
        media = media,
        title = escape(&record.title),
        description = escape(&record.description),
        date = escape(&record.date),
    )
}

/// End-of-list sentinel. Empty once everything is revealed.
///
/// Carries what the page script needs to request the next batch; the link
/// is the no-script fallback.
pub fn sentinel(grid: &RevealGrid) -> String {
    if !grid.has_more() {
        return String::new();
    }
    let visible = grid.visible();
    let batch = grid.config().batch;
    format!(
        r#"<div class="sentinel" id="load-more" data-offset="{visible}" data-batch="{batch}" data-total="{total}" data-delay-ms="{delay}"><a href="/?shown={next}">Load more</a></div>"#,
        visible = visible,
        batch = batch,
        total = grid.total(),
        delay = grid.config().delay.as_millis(),
        next = visible + grid.next_batch_len(),
    )
}

/// The detail-page player, rendered from its current state.
pub fn player(src: &str, state: &PlayerState) -> String {
    let mut out = String::from(r#"<div class="player" data-player>"#);
    out.push_str(r#"<a class="back" href="/" aria-label="Back">&larr;</a>"#);

    if let Some(error) = &state.error {
        let _ = write!(
            out,
            r#"<div class="player-error" data-role="error"><p>&#9888;&#65039; {}</p><button data-action="reload">Try Again</button></div>"#,
            escape(&error.to_string())
        );
        out.push_str("</div>");
        return out;
    }

    if state.loading {
        out.push_str(r#"<div class="spinner" data-role="loading"></div>"#);
    }
    let _ = write!(
        out,
        r#"<video src="{src}" preload="metadata" playsinline data-role="media"></video><div class="controls"><button data-action="toggle">{label}</button><div class="scrub" data-action="seek"><div class="scrub-fill" data-role="progress" style="width:{width}%"></div></div><span data-role="time">{time}</span><button data-action="fullscreen" aria-label="Fullscreen">&#x26F6;</button></div>"#,
        src = escape(src),
        label = if state.is_playing { "Pause" } else { "Play" },
        width = bar_width_percent(state.progress_percent),
        time = state.elapsed_label(),
    );
    out.push_str("</div>");
    out
}
