use axum::response::Html;

use crate::preview::zoom::{DEFAULT_WIDTH, MAX_WIDTH, MIN_WIDTH, STEP};

/// Page template. `{zoom_*}` placeholders are filled from the zoom slider
/// constants before serving.
const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>ATS Resume Checker</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; color: #1d1d1f; display: flex; min-height: 100vh; }
    aside { width: 260px; padding: 1.5rem; background: #f4f5f7; border-right: 1px solid #ddd; }
    main { flex: 1; padding: 2rem; }
    .columns { display: grid; grid-template-columns: 1fr 2fr; gap: 2rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    textarea { width: 100%; min-height: 8rem; padding: 0.5rem; box-sizing: border-box; }
    button { margin-top: 1rem; margin-right: 0.5rem; padding: 0.6rem 1rem; }
    hr { margin: 1.5rem 0; }
    .pages img { display: block; margin-bottom: 1rem; border: 1px solid #ddd; }
    .error { color: #a4000f; background: #ffecec; padding: 0.75rem; border-radius: 6px; }
    .success { color: #0b6b2b; background: #e7f7ec; padding: 0.75rem; border-radius: 6px; }
    .output { white-space: pre-wrap; background: #f6f8fa; padding: 1rem; border-radius: 6px; }
    .hidden { display: none; }
  </style>
</head>
<body>
  <aside>
    <h2>Feedback</h2>
    <label for="feedback">Provide your feedback:</label>
    <textarea id="feedback" placeholder="Share your thoughts or suggestions..."></textarea>
    <button id="feedbackBtn">Submit Feedback</button>
    <div id="feedbackStatus"></div>
  </aside>

  <main>
    <div class="columns">
      <section id="previewColumn">
        <div id="previewPanel" class="hidden">
          <h2>PDF Preview</h2>
          <label for="zoom">Zoom Level: <span id="zoomValue">{zoom_default}</span></label>
          <input id="zoom" type="range" min="{zoom_min}" max="{zoom_max}" step="{zoom_step}" value="{zoom_default}" />
          <div id="previewStatus"></div>
          <div id="pages" class="pages"></div>
        </div>
      </section>

      <section>
        <h1>ATS Resume Checker</h1>
        <label for="jobDescription">Enter the Job Description:</label>
        <textarea id="jobDescription" placeholder="Paste the job description here..."></textarea>
        <hr />
        <label for="resume">Upload Your Resume (PDF):</label>
        <input id="resume" type="file" accept=".pdf,application/pdf" />
        <div>
          <button id="analyzeBtn">Tell About the Resume</button>
          <button id="matchBtn">Percentage Match</button>
        </div>
        <div id="result"></div>
      </section>
    </div>
  </main>

  <script>
    const resumeInput = document.getElementById('resume');
    const zoom = document.getElementById('zoom');
    const zoomValue = document.getElementById('zoomValue');
    const pages = document.getElementById('pages');
    const previewPanel = document.getElementById('previewPanel');
    const previewStatus = document.getElementById('previewStatus');
    const result = document.getElementById('result');

    function message(el, cls, text) {
      el.innerHTML = '';
      const div = document.createElement('div');
      div.className = cls;
      div.textContent = text;
      el.appendChild(div);
    }

    async function errorText(res) {
      try {
        const json = await res.json();
        return json?.error?.message ?? res.statusText;
      } catch (_) {
        return res.statusText;
      }
    }

    function resumeForm(extra) {
      const form = new FormData();
      if (resumeInput.files.length) {
        form.append('resume', resumeInput.files[0]);
      }
      for (const [key, value] of Object.entries(extra || {})) {
        form.append(key, value);
      }
      return form;
    }

    function applyZoom() {
      zoomValue.textContent = zoom.value;
      for (const img of pages.querySelectorAll('img')) {
        img.style.width = zoom.value + 'px';
      }
    }

    resumeInput.addEventListener('change', async () => {
      pages.innerHTML = '';
      previewStatus.innerHTML = '';
      if (!resumeInput.files.length) {
        previewPanel.classList.add('hidden');
        return;
      }
      previewPanel.classList.remove('hidden');
      try {
        const res = await fetch('/api/v1/preview', {
          method: 'POST',
          body: resumeForm({ zoom: zoom.value }),
        });
        if (!res.ok) {
          message(previewStatus, 'error', await errorText(res));
          return;
        }
        const json = await res.json();
        for (const page of json.pages) {
          const img = document.createElement('img');
          img.src = page.data_uri;
          img.alt = 'Page ' + page.page_number;
          pages.appendChild(img);
        }
        zoom.value = json.display_width;
        applyZoom();
      } catch (e) {
        message(previewStatus, 'error', String(e));
      }
    });

    zoom.addEventListener('input', applyZoom);

    async function runAction(url, extra) {
      result.textContent = 'Working...';
      try {
        const res = await fetch(url, { method: 'POST', body: resumeForm(extra) });
        if (!res.ok) {
          message(result, 'error', await errorText(res));
          return;
        }
        const json = await res.json();
        result.innerHTML = '';
        const heading = document.createElement('h3');
        heading.textContent = json.heading;
        const output = document.createElement('div');
        output.className = 'output';
        output.textContent = json.output;
        result.append(heading, output);
      } catch (e) {
        message(result, 'error', String(e));
      }
    }

    document.getElementById('analyzeBtn').addEventListener('click', () =>
      runAction('/api/v1/analyze'));

    document.getElementById('matchBtn').addEventListener('click', () =>
      runAction('/api/v1/match', {
        job_description: document.getElementById('jobDescription').value,
      }));

    document.getElementById('feedbackBtn').addEventListener('click', async () => {
      const status = document.getElementById('feedbackStatus');
      try {
        const res = await fetch('/api/v1/feedback', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ feedback: document.getElementById('feedback').value }),
        });
        if (!res.ok) {
          message(status, 'error', await errorText(res));
          return;
        }
        const json = await res.json();
        message(status, 'success', json.message);
      } catch (e) {
        message(status, 'error', String(e));
      }
    });
  </script>
</body>
</html>
"#;

/// GET /
pub async fn index_handler() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    INDEX_TEMPLATE
        .replace("{zoom_min}", &MIN_WIDTH.to_string())
        .replace("{zoom_max}", &MAX_WIDTH.to_string())
        .replace("{zoom_step}", &STEP.to_string())
        .replace("{zoom_default}", &DEFAULT_WIDTH.to_string())
}
