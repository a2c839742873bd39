//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::Arc;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::ContentError;

/// Markdown renderer with syntax highlighting
///
/// Raw HTML in the source is passed through untouched. Articles are
/// first-party content, so nothing is sanitized.
#[derive(Clone)]
pub struct MarkdownRenderer {
    syntax_set: Arc<SyntaxSet>,
    theme_set: Arc<ThemeSet>,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: Arc::new(SyntaxSet::load_defaults_newlines()),
            theme_set: Arc::new(ThemeSet::load_defaults()),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    ///
    /// The work runs on the blocking pool; the returned HTML is complete or
    /// the call fails.
    pub async fn render(&self, markdown: &str) -> Result<String, ContentError> {
        let renderer = self.clone();
        let markdown = markdown.to_string();

        tokio::task::spawn_blocking(move || renderer.render_sync(&markdown))
            .await
            .map_err(|e| ContentError::render(format!("render task failed: {}", e)))?
    }

    /// Render markdown to HTML on the current thread
    pub fn render_sync(&self, markdown: &str) -> Result<String, ContentError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Language and collected text of the code block being read
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split(|c: char| c.is_whitespace() || c == ',')
                            .next()
                            .filter(|lang| !lang.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref())?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String, ContentError> {
        let Some(lang) = lang else {
            return Ok(format!("<pre><code>{}</code></pre>\n", html_escape(code)));
        };

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.themes.get(&self.theme_name).ok_or_else(|| {
            ContentError::render(format!("unknown highlight theme: {}", self.theme_name))
        })?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut highlighted = String::new();
        let mut line_count = 0;
        for line in LinesWithEndings::from(code) {
            let regions = highlighter
                .highlight_line(line, &self.syntax_set)
                .map_err(ContentError::render)?;
            let line_html = styled_line_to_highlighted_html(&regions, IncludeBackground::No)
                .map_err(ContentError::render)?;
            highlighted.push_str(&line_html);
            line_count += 1;
        }

        let lang = html_escape(lang);
        if self.line_numbers {
            Ok(add_line_numbers(&highlighted, line_count, &lang))
        } else {
            Ok(format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                lang, highlighted
            ))
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Put highlighted code next to a line-number gutter
fn add_line_numbers(code: &str, line_count: usize, lang: &str) -> String {
    let gutter = (1..=line_count)
        .map(|i| format!(r#"<span class="line-number">{}</span>"#, i))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre><code class="language-{}">{}</code></pre></td></tr></table></figure>"#,
        lang, gutter, lang, code
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
