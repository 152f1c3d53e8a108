use axum::{extract::State, response::Html, routing::get, Router};

use crate::models::AppState;

const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Cloud Container Portfolio</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; color: #1d1d1f; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    table { border-collapse: collapse; width: 100%; }
    th, td { text-align: left; padding: 0.4rem; border-bottom: 1px solid #eee; }
    pre { background: #f6f8fa; padding: 1rem; overflow: auto; }
  </style>
</head>
<body>
  <h1>Cloud Container Portfolio</h1>
  <p>Bucket: <code>{{bucket_name}}</code></p>

  <div class="card">
    <h2>Upload a file</h2>
    <input id="fileInput" type="file" />
    <button id="uploadBtn">Upload</button>
    <pre id="uploadStatus"></pre>
  </div>

  <div class="card">
    <h2>Files</h2>
    <button id="refreshBtn">Refresh</button>
    <table>
      <thead><tr><th>Name</th><th>Size (bytes)</th><th>Last modified</th></tr></thead>
      <tbody id="fileRows"></tbody>
    </table>
    <pre id="listStatus"></pre>
  </div>

  <script>
    const uploadStatus = document.getElementById('uploadStatus');
    const listStatus = document.getElementById('listStatus');
    const fileRows = document.getElementById('fileRows');

    async function refresh() {
      const res = await fetch('/files');
      const json = await res.json();
      fileRows.textContent = '';
      for (const file of json.files || []) {
        const row = document.createElement('tr');
        for (const value of [file.name, file.size, file.last_modified]) {
          const cell = document.createElement('td');
          cell.textContent = value;
          row.appendChild(cell);
        }
        fileRows.appendChild(row);
      }
      listStatus.textContent = json.error ? [json.error, json.message].filter(Boolean).join('\n') : '';
    }

    document.getElementById('uploadBtn').addEventListener('click', async () => {
      const fileInput = document.getElementById('fileInput');
      const formData = new FormData();
      if (fileInput.files.length) {
        formData.append('file', fileInput.files[0]);
      }
      uploadStatus.textContent = 'Uploading...';
      const res = await fetch('/upload', { method: 'POST', body: formData });
      const json = await res.json();
      uploadStatus.textContent = JSON.stringify(json, null, 2);
      await refresh();
    });

    document.getElementById('refreshBtn').addEventListener('click', refresh);
    refresh();
  </script>
</body>
</html>"#;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.bucket_name()))
}

pub fn render_index(bucket_name: &str) -> String {
    INDEX_TEMPLATE.replace("{{bucket_name}}", &escape_html(bucket_name))
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_shows_bucket_name() {
        let page = render_index("cloud-portfolio-demo");
        assert!(page.contains("<code>cloud-portfolio-demo</code>"));
        assert!(!page.contains("{{bucket_name}}"));
    }

    #[test]
    fn test_bucket_name_is_escaped() {
        let page = render_index("<script>x</script>");
        assert!(page.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!page.contains("<code><script>"));
    }
}
