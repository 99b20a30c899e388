use crate::models::ChartPoint;

pub fn render_index(points: &[ChartPoint], active_key: Option<&str>) -> String {
    let points_json = serde_json::to_string(points).unwrap_or_else(|_| "[]".to_string());
    INDEX_HTML
        .replace("{{POINTS}}", &points_json)
        .replace("{{ACTIVE_KEY}}", &escape_html(active_key.unwrap_or("")))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Voice Agent Analytics</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg: #f3f4f6;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #6366f1;
      --danger: #dc2626;
      --card: #ffffff;
      --shadow: 0 12px 32px rgba(31, 41, 55, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 24px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 16px;
    }

    .card-header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .card-header h2 {
      margin: 0;
      font-size: 1.15rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .link {
      background: none;
      border: none;
      color: var(--accent);
      font-weight: 600;
      cursor: pointer;
      padding: 0;
    }

    .link:hover {
      text-decoration: underline;
    }

    #chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-bar {
      fill: var(--accent);
    }

    .chart-grid {
      stroke: rgba(31, 41, 55, 0.1);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .session {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .status {
      font-size: 0.95rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .modal {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.4);
      display: none;
      align-items: center;
      justify-content: center;
      z-index: 50;
    }

    .modal.open {
      display: flex;
    }

    .modal-body {
      background: white;
      border-radius: 14px;
      padding: 24px;
      width: min(384px, 92vw);
      display: grid;
      gap: 10px;
    }

    .modal-body h3 {
      margin: 0 0 6px;
    }

    .modal-body input {
      border: 1px solid #d1d5db;
      border-radius: 8px;
      padding: 8px 10px;
      font: inherit;
      width: 100%;
    }

    .modal-actions {
      display: flex;
      justify-content: flex-end;
      gap: 8px;
      margin-top: 8px;
    }

    button.primary,
    button.danger,
    button.plain {
      border: none;
      border-radius: 8px;
      padding: 8px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
    }

    button.primary {
      background: var(--accent);
      color: white;
    }

    button.danger {
      background: var(--danger);
      color: white;
    }

    button.plain {
      background: transparent;
      color: var(--ink);
    }

    button:disabled {
      opacity: 0.55;
      cursor: progress;
    }

    .previous {
      background: #f9fafb;
      border-radius: 8px;
      padding: 10px 12px;
      font-size: 0.9rem;
    }

    .load-form {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    .load-form input {
      flex: 1 1 220px;
      border: 1px solid #d1d5db;
      border-radius: 8px;
      padding: 8px 10px;
      font: inherit;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Voice Agent Analytics</h1>

    <section class="card">
      <div class="card-header">
        <div>
          <h2>Average Call Duration</h2>
          <p class="subtitle">Duration in seconds (per 30-minute interval)</p>
        </div>
        <button class="link" id="edit-btn" type="button">Edit analytics values</button>
      </div>
      <svg id="chart" viewBox="0 0 600 260" aria-label="Average call duration" role="img"></svg>
      <div class="session" id="session" data-key="{{ACTIVE_KEY}}"></div>
    </section>

    <section class="card">
      <form class="load-form" id="load-form">
        <input id="load-email" type="email" placeholder="you@example.com" />
        <button class="primary" id="load-btn" type="submit">Load saved values</button>
      </form>
      <div class="status" id="status"></div>
    </section>
  </main>

  <div class="modal" id="edit-modal" role="dialog" aria-modal="true">
    <div class="modal-body">
      <h3>Edit chart values</h3>
      <div id="edit-fields"></div>
      <div class="modal-actions">
        <button class="plain" type="button" data-close="edit-modal">Cancel</button>
        <button class="primary" id="edit-save" type="button">Save</button>
      </div>
    </div>
  </div>

  <div class="modal" id="email-modal" role="dialog" aria-modal="true">
    <div class="modal-body">
      <h3>Save your analytics</h3>
      <p class="subtitle">Enter your email to store and retrieve your chart data.</p>
      <input id="save-email" type="email" placeholder="you@example.com" />
      <div class="modal-actions">
        <button class="plain" type="button" data-close="email-modal">Cancel</button>
        <button class="primary" id="email-continue" type="button">Continue</button>
      </div>
    </div>
  </div>

  <div class="modal" id="confirm-modal" role="dialog" aria-modal="true">
    <div class="modal-body">
      <h3>Overwrite existing data?</h3>
      <p class="subtitle">We found saved values for <b id="confirm-email"></b></p>
      <div class="previous" id="confirm-previous"></div>
      <div class="modal-actions">
        <button class="plain" type="button" data-close="confirm-modal">Cancel</button>
        <button class="danger" id="confirm-overwrite" type="button">Overwrite</button>
      </div>
    </div>
  </div>

  <script id="initial-points" type="application/json">{{POINTS}}</script>
  <script>
    const chartEl = document.getElementById('chart');
    const statusEl = document.getElementById('status');
    const sessionEl = document.getElementById('session');
    const editFields = document.getElementById('edit-fields');
    const saveEmailEl = document.getElementById('save-email');
    const loadEmailEl = document.getElementById('load-email');
    const confirmEmailEl = document.getElementById('confirm-email');
    const confirmPreviousEl = document.getElementById('confirm-previous');
    const busyButtons = ['edit-save', 'email-continue', 'confirm-overwrite', 'load-btn']
      .map((id) => document.getElementById(id));

    let points = JSON.parse(document.getElementById('initial-points').textContent);
    let working = [];
    let pending = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const setSession = (key, updatedAt) => {
      if (!key) {
        sessionEl.textContent = '';
        return;
      }
      const when = updatedAt ? ` (saved ${new Date(updatedAt).toLocaleString()})` : '';
      sessionEl.textContent = `Active: ${key}${when}`;
      saveEmailEl.value = key;
      loadEmailEl.value = key;
    };

    const setBusy = (busy) => {
      busyButtons.forEach((button) => {
        button.disabled = busy;
      });
    };

    const openModal = (id) => document.getElementById(id).classList.add('open');
    const closeModal = (id) => document.getElementById(id).classList.remove('open');

    const renderChart = () => {
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const width = 600;
      const height = 260;
      const paddingX = 44;
      const paddingY = 34;
      const top = 20;

      const max = Math.max(1, ...points.map((point) => point.value || 0));
      const slot = (width - paddingX * 2) / points.length;
      const barWidth = Math.max(6, slot * 0.6);
      const scaleY = (height - top - paddingY) / max;
      const y = (value) => height - paddingY - Math.max(0, value) * scaleY;

      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const bars = points
        .map((point, index) => {
          const x = paddingX + index * slot + (slot - barWidth) / 2;
          const top = y(point.value || 0);
          return `<rect class="chart-bar" x="${x.toFixed(2)}" y="${top.toFixed(2)}" width="${barWidth.toFixed(2)}" height="${(height - paddingY - top).toFixed(2)}" rx="6"><title>${point.label}: ${point.value}</title></rect>`
            + `<text class="chart-label" x="${(x + barWidth / 2).toFixed(2)}" y="${height - paddingY + 18}" text-anchor="middle">${point.label}</text>`;
        })
        .join('');

      chartEl.innerHTML = `${grid}${bars}`;
    };

    const renderEditFields = () => {
      editFields.innerHTML = '';
      working.forEach((value, index) => {
        const input = document.createElement('input');
        input.type = 'number';
        input.value = value;
        input.addEventListener('input', () => {
          working[index] = Number(input.value);
        });
        editFields.appendChild(input);
      });
    };

    const request = async (path, body) => {
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const applySaved = (data) => {
      points = data.points;
      renderChart();
      setSession(data.key, data.updated_at);
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const save = async (email, values) => {
      setBusy(true);
      setStatus('Saving...', 'info');
      try {
        const data = await request('/api/save', { email, values });
        closeModal('email-modal');
        if (data.status === 'confirmation_required') {
          pending = { email, values };
          confirmEmailEl.textContent = data.key;
          confirmPreviousEl.innerHTML = '';
          data.previous_values.forEach((value, index) => {
            const row = document.createElement('div');
            const label = points[index] ? points[index].label : `#${index + 1}`;
            row.textContent = `${label}: ${value}`;
            confirmPreviousEl.appendChild(row);
          });
          setStatus('', '');
          openModal('confirm-modal');
          return;
        }
        applySaved(data);
      } finally {
        setBusy(false);
      }
    };

    const overwrite = async () => {
      if (!pending) {
        return;
      }
      setBusy(true);
      setStatus('Saving...', 'info');
      try {
        const data = await request('/api/save/confirm', pending);
        pending = null;
        closeModal('confirm-modal');
        applySaved(data);
      } finally {
        setBusy(false);
      }
    };

    const load = async (email) => {
      setBusy(true);
      setStatus('Loading...', 'info');
      try {
        const data = await request('/api/load', { email });
        points = data.points;
        renderChart();
        setSession(data.active_key, data.updated_at);
        setStatus('Loaded', 'ok');
        setTimeout(() => setStatus('', ''), 1200);
      } finally {
        setBusy(false);
      }
    };

    document.getElementById('edit-btn').addEventListener('click', () => {
      working = points.map((point) => point.value);
      renderEditFields();
      openModal('edit-modal');
    });

    document.getElementById('edit-save').addEventListener('click', () => {
      closeModal('edit-modal');
      openModal('email-modal');
      saveEmailEl.focus();
    });

    document.getElementById('email-continue').addEventListener('click', () => {
      save(saveEmailEl.value, working.slice()).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('confirm-overwrite').addEventListener('click', () => {
      overwrite().catch((err) => setStatus(err.message, 'error'));
    });

    document.querySelectorAll('[data-close]').forEach((button) => {
      button.addEventListener('click', () => {
        if (button.dataset.close === 'confirm-modal') {
          pending = null;
        }
        closeModal(button.dataset.close);
      });
    });

    document.getElementById('load-form').addEventListener('submit', (event) => {
      event.preventDefault();
      load(loadEmailEl.value).catch((err) => setStatus(err.message, 'error'));
    });

    renderChart();
    setSession(sessionEl.dataset.key, null);
  </script>
</body>
</html>
"#;
