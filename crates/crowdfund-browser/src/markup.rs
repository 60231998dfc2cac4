// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! HTML rendering of the page view.
//!
//! Every interactive element carries `data-action` (plus `data-address`,
//! `data-toast` or `data-field` where needed) so the mount element can handle
//! all clicks and inputs with one delegated listener per event type.

use std::fmt::Write as _;

use crowdfund_app_core::toast::{ToastKind, ToastRender};
use crowdfund_app_core::view::{ConnectedView, DetailView, DirectoryView, PageView};

/// Escape text for use in element content and double-quoted attributes.
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

/// Render the whole page.
pub fn render_page(page: &PageView) -> String {
    let mut html = String::new();
    let _ = write!(html, "<h1>{}</h1>", escape(page.heading));
    match &page.connected {
        None => html.push_str(r#"<button data-action="connect">Connect Wallet</button>"#),
        Some(connected) => render_connected(&mut html, connected),
    }
    render_toasts(&mut html, &page.toasts);
    html
}

fn render_connected(html: &mut String, view: &ConnectedView) {
    let _ = write!(html, "<p class=\"account\">{}</p>", escape(&view.account_label));

    let form = &view.create_form;
    let symbol = escape(&view.currency_symbol);
    html.push_str("<section class=\"create\"><h2>Create Campaign</h2>");
    let _ = write!(
        html,
        "{}{}{}{}",
        input("title", "Title", &form.title),
        textarea("description", "Description", &form.description),
        input("goal", &format!("Goal ({symbol})"), &form.goal),
        input("duration", "Duration (days)", &form.duration_days),
    );
    html.push_str(
        "<button data-action=\"create\">Create Campaign</button>\
         <button data-action=\"fetch\">Fetch Campaigns</button></section>",
    );

    render_directory(html, &view.directory);
    if let Some(detail) = &view.detail {
        render_detail(html, detail);
    }
}

fn render_directory(html: &mut String, directory: &DirectoryView) {
    html.push_str("<section class=\"directory\"><h2>Campaigns</h2>");
    if let Some(message) = directory.empty_message {
        let _ = write!(html, "<p>{}</p>", escape(message));
    }
    html.push_str("<ul>");
    for entry in &directory.entries {
        let address = escape(&entry.address);
        let _ = write!(
            html,
            "<li><h3>{label}</h3><p>Address: <a href=\"{url}\" target=\"_blank\" rel=\"noopener\" \
             data-action=\"explorer\" data-address=\"{address}\">{address}</a></p>\
             <button data-action=\"load\" data-address=\"{address}\">View Details</button></li>",
            label = escape(&entry.label),
            url = escape(&entry.explorer_url),
        );
    }
    html.push_str("</ul></section>");
}

fn render_detail(html: &mut String, detail: &DetailView) {
    let symbol = escape(&detail.currency_symbol);
    let _ = write!(
        html,
        "<section class=\"detail\" data-address=\"{address}\"><h2>{title}</h2><p>{description}</p>\
         <p>Goal: {goal} {symbol}</p><p>Raised: {current} {symbol}</p>\
         <p>Time remaining: {remaining}</p>\
         <div class=\"progress\"><div class=\"progress-fill\" style=\"width: {width}\"></div></div>",
        address = escape(&detail.address),
        title = escape(&detail.title),
        description = escape(&detail.description),
        goal = escape(&detail.goal),
        current = escape(&detail.current),
        remaining = escape(&detail.time_remaining),
        width = escape(&detail.progress_width),
    );
    let _ = write!(
        html,
        "{}<button data-action=\"contribute\">Contribute</button></section>",
        input("contribution", &format!("Amount ({symbol})"), &detail.contribution_draft),
    );
}

fn render_toasts(html: &mut String, toasts: &[ToastRender]) {
    if toasts.is_empty() {
        return;
    }
    html.push_str("<div class=\"toasts\">");
    for toast in toasts {
        let kind = match toast.kind {
            ToastKind::Info => "info",
            ToastKind::Warn => "warn",
            ToastKind::Error => "error",
        };
        let _ = write!(
            html,
            "<div class=\"toast toast-{kind}\" role=\"status\"><strong>{}</strong>",
            escape(&toast.title)
        );
        if let Some(body) = &toast.body {
            let _ = write!(html, "<p>{}</p>", escape(body));
        }
        let _ = write!(
            html,
            "<button data-action=\"dismiss\" data-toast=\"{}\" aria-label=\"Dismiss\">×</button></div>",
            toast.id
        );
    }
    html.push_str("</div>");
}

fn input(field: &str, placeholder: &str, value: &str) -> String {
    format!(
        "<input data-field=\"{field}\" placeholder=\"{placeholder}\" value=\"{}\">",
        escape(value)
    )
}

fn textarea(field: &str, placeholder: &str, value: &str) -> String {
    format!(
        "<textarea data-field=\"{field}\" placeholder=\"{placeholder}\">{}</textarea>",
        escape(value)
    )
}
