//! HTML for the browser UI. Handlers only pass data in; nothing else depends
//! on the markup.

use qs_core::FileEntry;
use std::path::Path;

pub fn escape_html(s: &str) -> String {
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

/// `?token=...` suffix for links, empty when no token was presented.
fn token_query(token: Option<&str>) -> String {
    match token {
        Some(t) if !t.is_empty() => format!("?token={}", urlencoding::encode(t)),
        _ => String::new(),
    }
}

pub fn login_page(error: Option<&str>) -> String {
    let error = error.map(escape_html).unwrap_or_default();
    LOGIN_HTML.replace("{{ERROR}}", &error)
}

pub fn index_page(root: &Path, files: &[FileEntry], token: Option<&str>) -> String {
    let query = token_query(token);
    let mut items = String::new();
    for f in files {
        items.push_str(&format!(
            "<li class=\"file-item\"><span class=\"file-name\">{}</span><span class=\"file-size\">{}</span>\
             <div class=\"file-actions\"><a href=\"/download/{}{}\" download>Download</a></div></li>\n",
            escape_html(&f.name),
            escape_html(&f.size),
            urlencoding::encode(&f.name),
            query,
        ));
    }
    INDEX_HTML
        .replace("{{CURRENT_DIR}}", &escape_html(&root.to_string_lossy()))
        .replace("{{FILES}}", &items)
}

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>QuickShare - Sign in</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background: #1a1a1a;
       display: flex; justify-content: center; align-items: center; min-height: 100vh; padding: 20px; }
.login { background: #fff; padding: 48px 40px; border-radius: 4px; max-width: 420px; width: 100%; }
h1 { color: #1a1a1a; margin-bottom: 8px; text-align: center; font-size: 24px; }
p { color: #666; margin-bottom: 32px; text-align: center; font-size: 14px; }
input { width: 100%; padding: 12px 16px; border: 1px solid #d0d0d0; border-radius: 4px; font-size: 14px; margin-bottom: 20px; }
button { width: 100%; padding: 12px 16px; background: #1a1a1a; color: #fff; border: none; border-radius: 4px; font-size: 14px; cursor: pointer; }
.error { color: #d32f2f; margin-top: 12px; text-align: center; font-size: 13px; }
</style>
</head>
<body>
<div class="login">
  <h1>QuickShare</h1>
  <p>Enter the access password</p>
  <form method="POST" action="/login">
    <input type="password" name="password" placeholder="Password" required autofocus>
    <button type="submit">Sign in</button>
  </form>
  <div class="error">{{ERROR}}</div>
</div>
</body>
</html>
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>QuickShare</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background: #f5f5f5; padding: 24px; }
.container { max-width: 1200px; margin: 0 auto; }
.card { background: #fff; padding: 32px; border-radius: 4px; border: 1px solid #e5e5e5; margin-bottom: 24px; }
h1 { font-size: 28px; margin-bottom: 8px; }
h2 { font-size: 18px; margin-bottom: 24px; }
.info { color: #666; font-size: 13px; }
.main { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
@media (max-width: 768px) { .main { grid-template-columns: 1fr; } }
.upload-area { border: 2px dashed #d0d0d0; border-radius: 4px; padding: 48px 32px; text-align: center; cursor: pointer; background: #fafafa; }
.upload-area.dragover { border-color: #1a1a1a; background: #f0f0f0; }
.file-list { list-style: none; }
.file-item { display: flex; justify-content: space-between; align-items: center; padding: 14px 16px; background: #fafafa;
             border-radius: 4px; margin-bottom: 8px; border: 1px solid #e5e5e5; }
.file-name { flex: 1; font-size: 14px; word-break: break-all; }
.file-size { color: #999; font-size: 12px; margin: 0 16px; }
.file-actions a { color: #1a1a1a; text-decoration: none; padding: 6px 16px; border-radius: 4px; font-size: 13px; border: 1px solid #d0d0d0; }
.progress { width: 100%; height: 4px; background: #e5e5e5; margin-top: 16px; display: none; }
.progress-fill { height: 100%; background: #1a1a1a; width: 0%; }
.status { margin-top: 16px; font-size: 13px; }
.status.ok { color: #2e7d32; }
.status.err { color: #c62828; }
</style>
</head>
<body>
<div class="container">
  <div class="card">
    <h1>QuickShare</h1>
    <p class="info">Serving: {{CURRENT_DIR}}</p>
  </div>
  <div class="main">
    <div class="card">
      <h2>Upload</h2>
      <div class="upload-area" id="uploadArea">
        <p>Drop files here or click to choose</p>
        <input type="file" id="fileInput" style="display:none" multiple>
      </div>
      <div class="progress" id="progress"><div class="progress-fill" id="progressFill"></div></div>
      <div class="status" id="status"></div>
    </div>
    <div class="card">
      <h2>Download</h2>
      <ul class="file-list" id="fileList">
{{FILES}}      </ul>
    </div>
  </div>
</div>
<script>
const area = document.getElementById('uploadArea');
const input = document.getElementById('fileInput');
const progress = document.getElementById('progress');
const fill = document.getElementById('progressFill');
const status = document.getElementById('status');
const token = new URLSearchParams(window.location.search).get('token') || '';
const q = token ? '?token=' + encodeURIComponent(token) : '';

function esc(s) {
  return s.replace(/[&<>"']/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
}

area.addEventListener('click', () => input.click());
area.addEventListener('dragover', e => { e.preventDefault(); area.classList.add('dragover'); });
area.addEventListener('dragleave', () => area.classList.remove('dragover'));
area.addEventListener('drop', e => { e.preventDefault(); area.classList.remove('dragover'); upload(e.dataTransfer.files); });
input.addEventListener('change', e => upload(e.target.files));

function upload(files) {
  if (files.length === 0) return;
  const form = new FormData();
  for (const f of files) form.append('files', f);
  progress.style.display = 'block';
  fill.style.width = '0%';
  status.textContent = '';
  const xhr = new XMLHttpRequest();
  xhr.upload.addEventListener('progress', e => {
    if (e.lengthComputable) fill.style.width = (e.loaded / e.total * 100) + '%';
  });
  xhr.addEventListener('load', () => {
    fill.style.width = '100%';
    if (xhr.status === 200) {
      status.className = 'status ok';
      status.textContent = 'Upload complete, refreshing...';
      setTimeout(() => location.reload(), 1000);
    } else {
      status.className = 'status err';
      status.textContent = 'Upload failed: ' + xhr.responseText;
    }
  });
  xhr.addEventListener('error', () => {
    status.className = 'status err';
    status.textContent = 'Upload failed, please retry';
  });
  xhr.open('POST', '/upload' + q);
  xhr.send(form);
}

setInterval(() => {
  fetch('/api/files' + q)
    .then(r => r.json())
    .then(data => {
      document.getElementById('fileList').innerHTML = data.files.map(f =>
        `<li class="file-item"><span class="file-name">${esc(f.name)}</span><span class="file-size">${esc(f.size)}</span>` +
        `<div class="file-actions"><a href="/download/${encodeURIComponent(f.name)}${q}" download>Download</a></div></li>`
      ).join('');
    })
    .catch(err => console.error('refreshing file list failed:', err));
}, 5000);
</script>
</body>
</html>
"#;
