//! Static HTML dashboard for `portfoliodb report --html`.

use portfolio_core::project::{LifecycleState, ProjectRecord};
use portfolio_core::report::Report;
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 0; padding: 2rem; background: #f6f6f4; color: #222; }
h1 { margin-top: 0; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }
.card { background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.card img { width: 48px; height: 48px; object-fit: contain; float: right; }
.card h2 { font-size: 1.1rem; margin: 0 0 .5rem; }
.state { display: inline-block; font-size: .75rem; padding: 0 .4rem; border-radius: 4px; background: #ddd; }
.state.done { background: #c8e6c9; }
.state.wip { background: #fff3c4; }
.state.seed { background: #e1f0ff; }
.contribution { font-size: .75rem; color: #666; }
progress { width: 100%; }
.meta { font-size: .85rem; color: #555; }
footer { margin-top: 2rem; font-size: .8rem; color: #888; }
";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(report: &Report, generated_at: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Projects</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Projects</h1>\n<div class=\"grid\">\n");
    for record in &report.records {
        html.push_str(&card(record));
    }
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        "<footer>{} projects, generated {}</footer>",
        report.records.len(),
        escape(generated_at)
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn card(record: &ProjectRecord) -> String {
    let mut html = String::from("<article class=\"card\">\n");

    if let Some(logo) = &record.logo {
        let _ = writeln!(html, "<img src=\"{}\" alt=\"\">", escape(&logo.as_src()));
    }
    let _ = writeln!(
        html,
        "<h2>{}</h2>\n<span class=\"state {state}\">{state}</span>",
        escape(&record.name),
        state = record.state,
    );
    if record.contribution {
        html.push_str(" <span class=\"contribution\">contribution</span>\n");
    }
    if let Some(summary) = &record.summary {
        let _ = writeln!(html, "<p>{}</p>", escape(summary));
    }
    match record.progress {
        Some(p) => {
            let _ = writeln!(
                html,
                "<progress max=\"100\" value=\"{pct:.0}\">{pct:.0}%</progress>",
                pct = p * 100.0
            );
        }
        None if record.state != LifecycleState::Seed => {
            html.push_str("<p class=\"meta\">progress unknown</p>\n");
        }
        None => {}
    }
    if let Some(version) = &record.latest_version {
        let _ = writeln!(html, "<p class=\"meta\">{}</p>", escape(version));
    }
    if let Some(url) = &record.github_url {
        let label = if record.state == LifecycleState::Seed {
            "idea board"
        } else {
            "GitHub"
        };
        let _ = writeln!(html, "<a href=\"{}\">{label}</a>", escape(url));
    }

    html.push_str("</article>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::metadata::PresenceMap;
    use portfolio_core::remote::Identity;

    fn record(name: &str, state: LifecycleState) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            directory: None,
            state,
            progress: None,
            versions: vec![],
            latest_version: None,
            logo: None,
            contribution: false,
            github_url: None,
            presence: PresenceMap::absent(),
            languages: vec![],
            summary: None,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn cards_carry_state_progress_and_links() {
        let mut wip = record("<quest>", LifecycleState::Wip);
        wip.progress = Some(0.25);
        wip.latest_version = Some("v1.2.0".to_string());
        wip.github_url = Some("https://github.com/ewen/quest?a=1&b=2".to_string());
        wip.contribution = true;

        let mut seed = record("bleep", LifecycleState::Seed);
        seed.summary = Some("A tiny synth".to_string());

        let report = Report {
            identity: Identity::default(),
            records: vec![wip, seed],
        };
        let html = render(&report, "2024-05-01 10:00");

        assert!(html.contains("<h2>&lt;quest&gt;</h2>"));
        assert!(html.contains("class=\"state wip\""));
        assert!(html.contains("value=\"25\""));
        assert!(html.contains("v1.2.0"));
        assert!(html.contains("href=\"https://github.com/ewen/quest?a=1&amp;b=2\""));
        assert!(html.contains("contribution</span>"));
        assert!(html.contains("<p>A tiny synth</p>"));
        assert!(!html.contains("progress unknown"));
        assert!(html.contains("2 projects, generated 2024-05-01 10:00"));
    }
}
