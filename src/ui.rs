use crate::models::{DashboardSummary, MemberRecord, NotificationView, ReminderRecord};
use crate::status;
use chrono::{Local, NaiveDate};

/// Escape a record field for interpolation into markup. Every value coming
/// from the backend goes through here; names are display text, never HTML.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Fragment shown when the search box is submitted empty.
pub fn render_search_prompt() -> String {
    r#"<p class="muted">Please enter a member name to search</p>"#.to_string()
}

/// Fragment shown when the upstream search call failed.
pub fn render_search_error() -> String {
    r#"<p class="panel-error">Search error. Please try again.</p>"#.to_string()
}

/// Fragment shown when the reminder list could not be loaded.
pub fn render_reminder_error() -> String {
    r#"<p class="panel-error">Error loading reminders</p>"#.to_string()
}

pub fn render_search_results(members: &[MemberRecord], backend_base: &str) -> String {
    render_search_results_at(Local::now().date_naive(), members, backend_base)
}

/// Search panel fragment. Status badges are derived from `today` at render
/// time; a later render of the same records may classify differently.
pub fn render_search_results_at(
    today: NaiveDate,
    members: &[MemberRecord],
    backend_base: &str,
) -> String {
    if members.is_empty() {
        return r#"<p class="muted">No members found</p>"#.to_string();
    }

    let mut html = String::new();
    for (index, member) in members.iter().enumerate() {
        let status = status::classify_at(today, &member.expiry_date);
        html.push_str(&format!(
            r#"<div class="search-result-item fade-item" style="animation-delay: {delay}ms">
  <div class="member-info">
    <strong>{name}</strong>
    <div class="member-meta">
      {membership} &bull; Expires: {expiry}
      <span class="member-status-badge {badge_class}">{badge}</span>
    </div>
  </div>
  <div class="member-actions">
    <a href="{base}/checkin/{id}" class="btn-edit">Check-in</a>
    <a href="{base}/members" class="btn-edit">View</a>
    <a href="{base}/add_payment_form" class="btn-edit">Payment</a>
  </div>
</div>
"#,
            delay = index * 100,
            name = escape(&member.name),
            membership = escape(&member.membership_type),
            expiry = escape(&member.expiry_date),
            badge_class = status.css_class(),
            badge = status.label(),
            base = escape(backend_base),
            id = member.id,
        ));
    }
    html
}

/// Reminder panel fragment. Urgency comes from the server-computed day count,
/// not from re-deriving it here.
pub fn render_reminder_list(reminders: &[ReminderRecord]) -> String {
    if reminders.is_empty() {
        return r#"<p class="muted">No members need reminders right now! &#127881;</p>"#.to_string();
    }

    let mut html = String::from("<h4>Members Needing SMS Reminders:</h4>\n");
    for (index, member) in reminders.iter().enumerate() {
        let (urgency, urgent) = status::urgency_label(member.days_until_expiry);
        let urgency_class = if urgent { "urgency urgent" } else { "urgency soon" };
        html.push_str(&format!(
            r#"<div class="reminder-member-item fade-item" style="animation-delay: {delay}ms">
  <div>
    <strong>{name}</strong>
    <div class="member-meta">{membership} &bull; {phone}</div>
    <div class="{urgency_class}">{urgency} ({expiry})</div>
  </div>
  <div class="reminder-actions">
    <button class="btn-edit" onclick="sendReminder({id})">&#128241; Send SMS</button>
  </div>
</div>
"#,
            delay = index * 100,
            name = escape(&member.name),
            membership = escape(&member.membership_type),
            phone = escape(&member.phone),
            urgency = escape(&urgency),
            expiry = escape(&member.expiry_date),
            id = member.id,
        ));
    }
    html
}

/// Membership doughnut drawn straight from the typed summary counts. Two
/// slices via stroke-dasharray on a circle, no trigonometry needed.
pub fn render_membership_chart(summary: &DashboardSummary) -> String {
    let active = summary.active_memberships;
    let expired = summary.expired_memberships();
    let total = active + expired;
    if total == 0 {
        return r#"<p class="muted">No member data</p>"#.to_string();
    }

    const RADIUS: f64 = 54.0;
    let circumference = 2.0 * std::f64::consts::PI * RADIUS;
    let active_len = circumference * active as f64 / total as f64;
    let rest = circumference - active_len;

    format!(
        r##"<svg viewBox="0 0 160 160" class="doughnut" role="img" aria-label="Active vs expired members">
  <circle cx="80" cy="80" r="54" fill="none" stroke="#ff6b6b" stroke-width="22" />
  <circle cx="80" cy="80" r="54" fill="none" stroke="#00b09b" stroke-width="22"
          stroke-dasharray="{active_len:.2} {rest:.2}" transform="rotate(-90 80 80)" />
  <text x="80" y="76" text-anchor="middle" class="doughnut-count">{active}</text>
  <text x="80" y="94" text-anchor="middle" class="doughnut-label">active</text>
</svg>
<div class="chart-legend">
  <span class="legend-dot active"></span> Active Members ({active})
  <span class="legend-dot expired"></span> Expired Members ({expired})
</div>"##
    )
}

/// Revenue trend bars. Widths are computed from the typed revenue months, the
/// tallest month is the 100% bar.
pub fn render_revenue_trend(summary: &DashboardSummary) -> String {
    if summary.revenue_months.is_empty() {
        return r#"<p class="muted">No revenue recorded yet</p>"#.to_string();
    }

    let max = summary
        .revenue_months
        .iter()
        .map(|month| month.total)
        .fold(0.0_f64, f64::max);

    let mut html = String::new();
    for (index, month) in summary.revenue_months.iter().enumerate() {
        let width = if max > 0.0 {
            (month.total / max * 100.0).round()
        } else {
            0.0
        };
        html.push_str(&format!(
            r#"<div class="revenue-item fade-item" style="animation-delay: {delay}ms">
  <span class="revenue-label">{label}</span>
  <div class="progress-track"><div class="progress-fill" style="width: {width}%"></div></div>
  <span class="revenue-amount">R{total:.2}</span>
</div>
"#,
            delay = index * 100,
            label = escape(&month.label),
            width = width,
            total = month.total,
        ));
    }
    html
}

/// Banners already active when the page is served.
pub fn render_notifications(notices: &[NotificationView]) -> String {
    let mut html = String::new();
    for notice in notices {
        html.push_str(&format!(
            r#"<div class="notification {severity}" data-notification-id="{id}">
  <span>{message}</span>
  <button onclick="dismissNotification(this, {id})">&times;</button>
</div>
"#,
            severity = escape(&notice.severity),
            id = notice.id,
            message = escape(&notice.message),
        ));
    }
    html
}

/// Full dashboard page from the typed summary. Nothing on this page is read
/// back out of the markup afterwards.
pub fn render_dashboard(summary: &DashboardSummary, notices: &[NotificationView]) -> String {
    DASHBOARD_HTML
        .replace("{{TOTAL_MEMBERS}}", &summary.total_members.to_string())
        .replace("{{ACTIVE_MEMBERSHIPS}}", &summary.active_memberships.to_string())
        .replace("{{EXPIRING_COUNT}}", &summary.expiring_soon.to_string())
        .replace("{{PAYMENTS_DUE}}", &summary.payments_due.to_string())
        .replace("{{CLASSES_TODAY}}", &summary.classes_today.to_string())
        .replace(
            "{{SATISFACTION}}",
            &format!("{:.1}/5", summary.satisfaction_display()),
        )
        .replace("{{PHONES_COUNT}}", &summary.members_with_phones.to_string())
        .replace(
            "{{REMINDERS_DUE}}",
            &summary.members_needing_reminders.to_string(),
        )
        .replace("{{RECENT_REMINDERS}}", &summary.recent_reminders.to_string())
        .replace("{{MEMBERSHIP_CHART}}", &render_membership_chart(summary))
        .replace("{{REVENUE_TREND}}", &render_revenue_trend(summary))
        .replace("{{NOTIFICATIONS}}", &render_notifications(notices))
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Club Dashboard</title>
  <style>
    :root {
      --ink: #1f2933;
      --muted: #666;
      --accent: #00b09b;
      --danger: #ff6b6b;
      --card: #ffffff;
      --shadow: 0 5px 15px rgba(0, 0, 0, 0.08);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: #f4f6f8;
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 24px 18px 48px;
    }

    .main-content {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    h1 { margin: 0; font-size: 1.8rem; }
    h3 { margin: 0 0 10px; }
    h4 { margin: 10px 0 6px; }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 14px;
    }

    .card {
      background: var(--card);
      border-radius: 12px;
      padding: 16px;
      box-shadow: var(--shadow);
    }

    .card .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
    }

    .card p {
      margin: 6px 0 0;
      font-size: 1.6rem;
      font-weight: 600;
    }

    .panel {
      background: var(--card);
      border-radius: 12px;
      padding: 18px;
      box-shadow: var(--shadow);
    }

    .muted { color: var(--muted); }
    .panel-error { color: var(--danger); }

    .search-row { display: flex; gap: 8px; }

    .search-row input {
      flex: 1;
      padding: 10px 12px;
      border: 1px solid #d4d9de;
      border-radius: 8px;
      font-size: 1rem;
    }

    button, .btn-edit {
      appearance: none;
      border: none;
      border-radius: 8px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      display: inline-block;
    }

    .btn-edit { padding: 6px 12px; }

    .search-result-item, .reminder-member-item {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      padding: 12px 0;
      border-bottom: 1px solid #edf0f2;
    }

    .member-meta { font-size: 14px; color: var(--muted); }
    .member-actions, .reminder-actions { display: flex; gap: 6px; }

    .member-status-badge {
      margin-left: 6px;
      padding: 2px 8px;
      border-radius: 999px;
      font-size: 11px;
      font-weight: 700;
      color: white;
    }

    .status-active { background: var(--accent); }
    .status-expiring { background: #d97706; }
    .status-expired { background: #dc2626; }
    .status-unknown { background: #64748b; }

    .urgency.urgent { color: #dc2626; font-weight: bold; }
    .urgency.soon { color: #d97706; }

    .chart-row {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 14px;
    }

    .doughnut { width: 200px; height: 200px; display: block; margin: 0 auto; }
    .doughnut-count { font-size: 26px; font-weight: 700; fill: var(--ink); }
    .doughnut-label { font-size: 12px; fill: var(--muted); }

    .chart-legend { text-align: center; font-size: 0.85rem; color: var(--muted); }

    .legend-dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin: 0 4px 0 10px;
    }

    .legend-dot.active { background: var(--accent); }
    .legend-dot.expired { background: var(--danger); }

    .revenue-item {
      display: grid;
      grid-template-columns: 48px 1fr 90px;
      align-items: center;
      gap: 10px;
      padding: 6px 0;
    }

    .revenue-amount { text-align: right; font-weight: 600; }

    .progress-track {
      height: 10px;
      border-radius: 999px;
      background: #e7ebee;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      border-radius: 999px;
      background: linear-gradient(45deg, #00b09b, #96c93d);
      transition: width 0.5s ease;
    }

    .notification {
      position: fixed;
      top: 20px;
      right: 20px;
      padding: 15px 20px;
      border-radius: 10px;
      color: white;
      font-weight: 600;
      z-index: 10000;
      display: flex;
      align-items: center;
      gap: 10px;
      box-shadow: 0 5px 15px rgba(0, 0, 0, 0.3);
      animation: slideIn 0.3s ease;
    }

    .notification.success { background: linear-gradient(45deg, #00b09b, #96c93d); }
    .notification.error { background: linear-gradient(45deg, #ff6b6b, #ffa8a8); }
    .notification.info { background: linear-gradient(45deg, #667eea, #764ba2); }

    .notification button {
      background: none;
      border: none;
      color: white;
      font-size: 18px;
      padding: 0;
      width: 20px;
      height: 20px;
    }

    .notification + .notification { margin-top: 64px; }

    input.invalid { border-color: var(--danger); animation: shake 0.5s ease; }

    .fade-item { animation: fadeUp 0.4s ease both; }

    @keyframes slideIn {
      from { transform: translateX(100%); opacity: 0; }
      to { transform: translateX(0); opacity: 1; }
    }

    @keyframes shake {
      0%, 100% { transform: translateX(0); }
      25% { transform: translateX(-5px); }
      75% { transform: translateX(5px); }
    }

    @keyframes fadeUp {
      from { opacity: 0; transform: translateY(-10px); }
      to { opacity: 1; transform: translateY(0); }
    }
  </style>
</head>
<body data-page="dashboard">
  <main class="main-content">
    <h1>Fitness Club Dashboard</h1>

    <section class="cards">
      <div class="card"><span class="label">Total Members</span><p>{{TOTAL_MEMBERS}}</p></div>
      <div class="card"><span class="label">Active Memberships</span><p>{{ACTIVE_MEMBERSHIPS}}</p></div>
      <div class="card"><span class="label">Expiring Soon</span><p id="expiringCount">{{EXPIRING_COUNT}}</p></div>
      <div class="card"><span class="label">Payments Due</span><p id="paymentsDueCount">{{PAYMENTS_DUE}}</p></div>
      <div class="card"><span class="label">Classes Today</span><p id="classesTodayCount">{{CLASSES_TODAY}}</p></div>
      <div class="card"><span class="label">Satisfaction</span><p id="satisfactionScore">{{SATISFACTION}}</p></div>
    </section>

    <section class="chart-row">
      <div class="panel">
        <h3>Membership Overview</h3>
        {{MEMBERSHIP_CHART}}
      </div>
      <div class="panel">
        <h3>Revenue Trend</h3>
        {{REVENUE_TREND}}
      </div>
    </section>

    <section class="panel">
      <h3>Quick Member Search</h3>
      <div class="search-row">
        <input type="search" id="quickSearch" placeholder="Search member by name..." />
        <button onclick="quickSearchMember()">Search</button>
      </div>
      <div id="quickSearchResults"></div>
    </section>

    <section class="panel">
      <h3>SMS Reminders</h3>
      <p class="muted">
        {{PHONES_COUNT}} members with phones &bull; {{REMINDERS_DUE}} needing reminders
        &bull; {{RECENT_REMINDERS}} sent this week
      </p>
      <div class="search-row">
        <button onclick="loadReminders()">Load Reminder List</button>
        <button onclick="sendTestReminder()">Send Test Reminder</button>
      </div>
      <div id="reminderList" style="display: none;"></div>
    </section>
  </main>

  {{NOTIFICATIONS}}

  <script>
    function showNotification(message, severity = 'success') {
      const banner = document.createElement('div');
      banner.className = `notification ${severity}`;
      const text = document.createElement('span');
      text.textContent = message;
      const close = document.createElement('button');
      close.textContent = '×';
      close.addEventListener('click', () => banner.remove());
      banner.append(text, close);
      document.body.appendChild(banner);
      setTimeout(() => banner.remove(), 5000);
    }

    function dismissNotification(button, id) {
      button.parentElement.remove();
      fetch(`/api/notifications/${id}/dismiss`, { method: 'POST' }).catch(() => {});
    }

    function quickSearchMember() {
      const query = document.getElementById('quickSearch').value.trim();
      const results = document.getElementById('quickSearchResults');
      results.innerHTML = '<p class="muted">Searching...</p>';
      fetch(`/fragments/search?q=${encodeURIComponent(query)}`)
        .then((response) => {
          if (response.status === 204) return null; // superseded by a newer search
          if (!response.ok) throw new Error('search failed');
          return response.text();
        })
        .then((html) => {
          if (html !== null) results.innerHTML = html;
        })
        .catch(() => {
          results.innerHTML = '<p class="panel-error">Search error. Please try again.</p>';
        });
    }

    function loadReminders() {
      const list = document.getElementById('reminderList');
      fetch('/fragments/reminders')
        .then((response) => {
          if (!response.ok) throw new Error('reminders failed');
          return response.text();
        })
        .then((html) => {
          list.innerHTML = html;
          list.style.display = 'block';
        })
        .catch(() => {
          list.innerHTML = '<p class="panel-error">Error loading reminders</p>';
          list.style.display = 'block';
        });
    }

    function handleReminderResponse(payload) {
      showNotification(payload.notification.message, payload.notification.severity);
      if (payload.reload_after_ms != null) {
        setTimeout(loadReminders, payload.reload_after_ms);
      }
    }

    function sendReminder(memberId) {
      showNotification('Sending SMS reminder...', 'info');
      fetch(`/reminders/${memberId}/send`, { method: 'POST' })
        .then((response) => {
          if (!response.ok) throw new Error('send failed');
          return response.json();
        })
        .then(handleReminderResponse)
        .catch(() => showNotification('Error sending SMS', 'error'));
    }

    function sendTestReminder() {
      fetch('/reminders/test', { method: 'POST' })
        .then((response) => {
          if (!response.ok) throw new Error('test failed');
          return response.json();
        })
        .then(handleReminderResponse)
        .catch(() => showNotification('Error finding test member', 'error'));
    }

    function validateForm(form) {
      let valid = true;
      form.querySelectorAll('input[required], select[required]').forEach((input) => {
        if (!input.value.trim()) {
          input.classList.add('invalid');
          setTimeout(() => input.classList.remove('invalid'), 500);
          valid = false;
        }
      });
      return valid;
    }

    document.addEventListener('DOMContentLoaded', () => {
      const searchInput = document.getElementById('quickSearch');
      if (searchInput) {
        searchInput.addEventListener('keypress', (event) => {
          if (event.key === 'Enter') quickSearchMember();
        });
      }

      document.querySelectorAll('form').forEach((form) => {
        form.addEventListener('submit', (event) => {
          if (!validateForm(form)) {
            event.preventDefault();
            showNotification('Please fill in all required fields', 'error');
          }
        });
      });

      // substring filter for any table next to a search input
      document.querySelectorAll('input[type="search"][data-filter-table]').forEach((input) => {
        const table = document.querySelector(input.dataset.filterTable);
        if (!table) return;
        input.addEventListener('input', () => {
          const filter = input.value.toLowerCase();
          table.querySelectorAll('tbody tr').forEach((row) => {
            row.style.display = row.textContent.toLowerCase().includes(filter) ? '' : 'none';
          });
        });
      });

      if (document.body.dataset.page === 'dashboard') {
        setTimeout(() => showNotification('Welcome to Fitness Club Dashboard!', 'info'), 1000);
      }
    });
  </script>
</body>
</html>
"#;
