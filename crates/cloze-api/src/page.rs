//! Server-rendered exercise page.
//!
//! The page is a single self-contained HTML document: styles and the
//! recorder script are inlined, so the binary has no static assets to serve
//! at runtime. The recorder captures microphone audio, posts it to
//! `/transcribe`, then asks `/judge` for a verdict and updates the page in
//! place.

use cloze_core::types::{Dependency, PosTag};
use cloze_exercise::{AnswerKey, Verdict};

/// Everything the exercise page can show. `Default` renders the bare form
/// with a pending judgment.
#[derive(Debug, Clone)]
pub struct PageView {
    pub input_text: String,
    pub masked_text: Option<String>,
    pub answer_key: AnswerKey,
    /// Raw tagger output: (surface form, tag) in document order.
    pub tagged_words: Vec<(String, String)>,
    pub dependencies: Vec<Dependency>,
    pub transcription: Option<String>,
    pub verdict: Verdict,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            masked_text: None,
            answer_key: AnswerKey::new(),
            tagged_words: Vec::new(),
            dependencies: Vec::new(),
            transcription: None,
            verdict: Verdict::Pending,
        }
    }
}

/// Escape text for safe interpolation into HTML.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; min-height: 6rem; }
fieldset { border: 1px solid #ccc; margin: 1rem 0; }
label.tag { display: inline-block; margin-right: 0.8rem; }
section { margin-top: 1.5rem; }
table { border-collapse: collapse; }
td, th { border: 1px solid #ccc; padding: 0.2rem 0.6rem; }
.correct { color: green; }
.incorrect { color: red; }
"#;

const RECORDER_JS: &str = r#"
let mediaRecorder = null;
let audioChunks = [];

document.getElementById("recordButton").addEventListener("click", async () => {
  const button = document.getElementById("recordButton");
  if (mediaRecorder && mediaRecorder.state === "recording") {
    mediaRecorder.stop();
    button.textContent = "Start recording";
    return;
  }

  const stream = await navigator.mediaDevices.getUserMedia({ audio: true });
  mediaRecorder = new MediaRecorder(stream, { mimeType: "audio/webm" });
  audioChunks = [];

  mediaRecorder.ondataavailable = (event) => audioChunks.push(event.data);
  mediaRecorder.onstop = async () => {
    const blob = new Blob(audioChunks, { type: "audio/webm" });
    document.getElementById("audioPlayback").src = URL.createObjectURL(blob);

    const formData = new FormData();
    formData.append("audio", blob, "recording.webm");

    const resp = await fetch("/transcribe", { method: "POST", body: formData });
    const data = await resp.json();
    if (!resp.ok) {
      document.getElementById("transcription").textContent = data.error;
      return;
    }
    document.getElementById("transcription").textContent = data.text;

    const params = new URLSearchParams();
    params.append("input_text", document.querySelector("textarea[name='input_text']").value);
    params.append("transcription_text", data.text);
    document.querySelectorAll("input[name='pos_checkbox']:checked")
      .forEach((box) => params.append("pos_checkbox", box.value));

    const judged = await fetch("/judge", { method: "POST", body: params });
    const verdict = await judged.json();
    const result = document.getElementById("judgeResult");
    result.textContent = verdict.is_correct ? "Correct" : "Incorrect";
    result.className = verdict.is_correct ? "correct" : "incorrect";
  };

  mediaRecorder.start();
  button.textContent = "Stop recording";
});
"#;

/// Render the exercise page.
pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Cloze Exercises</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Cloze Exercises</h1>\n");

    // Input form.
    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str("<textarea name=\"input_text\" placeholder=\"Enter English text...\">");
    html.push_str(&escape(&view.input_text));
    html.push_str("</textarea>\n<fieldset>\n<legend>Mask these parts of speech</legend>\n");
    for tag in PosTag::RECOGNIZED {
        html.push_str(&format!(
            "<label class=\"tag\"><input type=\"checkbox\" name=\"pos_checkbox\" value=\"{tag}\"> {tag}</label>\n",
        ));
    }
    html.push_str("</fieldset>\n<button type=\"submit\">Create exercise</button>\n</form>\n");

    // Results.
    if let Some(masked) = &view.masked_text {
        html.push_str("<section>\n<h2>Masked text</h2>\n<p>");
        html.push_str(&escape(masked));
        html.push_str("</p>\n</section>\n");

        html.push_str("<section>\n<h2>Answer key</h2>\n<ol>\n");
        for word in view.answer_key.values() {
            html.push_str("<li>");
            html.push_str(&escape(word));
            html.push_str("</li>\n");
        }
        html.push_str("</ol>\n</section>\n");

        html.push_str("<section>\n<h2>Tagger output</h2>\n<table>\n<tr><th>Word</th><th>Tag</th></tr>\n");
        for (word, tag) in &view.tagged_words {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(word),
                escape(tag)
            ));
        }
        html.push_str("</table>\n</section>\n");

        html.push_str(
            "<section>\n<h2>Dependencies</h2>\n<table>\n<tr><th>Word</th><th>Relation</th><th>Head</th></tr>\n",
        );
        for dep in &view.dependencies {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&dep.text),
                escape(&dep.relation),
                escape(dep.head.as_deref().unwrap_or("—"))
            ));
        }
        html.push_str("</table>\n</section>\n");
    }

    // Speaking practice.
    html.push_str("<section>\n<h2>Speak your answer</h2>\n");
    html.push_str("<button type=\"button\" id=\"recordButton\">Start recording</button>\n");
    html.push_str("<audio id=\"audioPlayback\" controls></audio>\n");
    html.push_str("<p>Transcription: <span id=\"transcription\">");
    if let Some(t) = &view.transcription {
        html.push_str(&escape(t));
    }
    html.push_str("</span></p>\n<p>Result: <span id=\"judgeResult\"");
    match view.verdict {
        Verdict::Pending => html.push_str(">"),
        Verdict::Correct => html.push_str(" class=\"correct\">Correct"),
        Verdict::Incorrect => html.push_str(" class=\"incorrect\">Incorrect"),
    }
    html.push_str("</span></p>\n</section>\n");

    html.push_str("<script>");
    html.push_str(RECORDER_JS);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}
