use crate::models::{AppData, Company};
use crate::validate::Validation;

pub fn render_dashboard(data: &AppData) -> String {
    let company = data
        .company
        .as_ref()
        .map_or_else(|| "Maintenance Tracker".to_string(), |c| escape_html(&c.name));
    let notices = if data.notifications.is_empty() {
        String::new()
    } else {
        let items: String = data
            .notifications
            .iter()
            .rev()
            .take(5)
            .map(|n| format!("<li>{}</li>", escape_html(&n.message)))
            .collect();
        format!("<ul class=\"notices\">{items}</ul>")
    };

    page("Dashboard", DASHBOARD_BODY)
        .replace("{{COMPANY}}", &company)
        .replace("{{NOTICES}}", &notices)
}

pub fn render_company_setup(company: Option<&Company>, validation: &Validation) -> String {
    let (name, logo_url, contact_info) = company.map_or_else(
        || (String::new(), String::new(), String::new()),
        |c| {
            (
                escape_html(&c.name),
                escape_html(&c.logo_url),
                escape_html(&c.contact_info),
            )
        },
    );

    page("Company Setup", COMPANY_SETUP_BODY)
        .replace("{{NAME}}", &name)
        .replace("{{LOGO_URL}}", &logo_url)
        .replace("{{CONTACT_INFO}}", &contact_info)
        .replace("{{C_NAME}}", validation.mark("name"))
}

pub fn render_maintenance_log(validation: &Validation) -> String {
    page("New Maintenance Log", MAINTENANCE_LOG_BODY)
        .replace("{{C_DATE}}", validation.mark("date"))
        .replace("{{C_LOT_NUMBER}}", validation.mark("lot_number"))
        .replace("{{C_CONTACT_DETAILS}}", validation.mark("contact_details"))
        .replace("{{C_MAINTENANCE_CLASS}}", validation.mark("maintenance_class"))
        .replace("{{C_DESCRIPTION}}", validation.mark("description"))
        .replace("{{C_ALLOCATION}}", validation.mark("allocation"))
}

pub fn render_work_order(data: &AppData, validation: &Validation) -> String {
    let options: String = data
        .maintenance_logs
        .values()
        .map(|log| {
            format!(
                "<option value=\"{}\">#{} {} ({})</option>",
                log.id,
                log.id,
                escape_html(&log.lot_number),
                log.date
            )
        })
        .collect();

    page("New Work Order", WORK_ORDER_BODY)
        .replace("{{LOG_OPTIONS}}", &options)
        .replace("{{C_MAINTENANCE_LOG_ID}}", validation.mark("maintenance_log_id"))
        .replace("{{C_STATUS}}", validation.mark("status"))
        .replace("{{C_ASSIGNED_TO}}", validation.mark("assigned_to"))
        .replace("{{C_SCHEDULED_DATE}}", validation.mark("scheduled_date"))
        .replace("{{C_PRIORITY}}", validation.mark("priority"))
}

fn page(title: &str, body: &str) -> String {
    BASE_HTML.replace("{{TITLE}}", title).replace("{{BODY}}", body)
}

fn escape_html(value: &str) -> String {
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

const BASE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} - Maintenance Tracker</title>
  <style>
    :root {
      --ink: #1f2a33;
      --paper: #f4f6f8;
      --card: #ffffff;
      --line: #d7dee4;
      --accent: #2f6f8f;
      --pending: #ffc107;
      --in-progress: #17a2b8;
      --completed: #28a745;
      --danger: #c63b2b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--paper);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 24px 16px 48px;
    }

    main {
      width: min(980px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    nav {
      display: flex;
      gap: 14px;
      flex-wrap: wrap;
    }

    nav a {
      color: var(--accent);
      text-decoration: none;
      font-weight: 600;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 18px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #6a7680;
    }

    .stat .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
    }

    .charts {
      display: grid;
      grid-template-columns: 240px 1fr;
      gap: 14px;
      align-items: center;
    }

    svg {
      width: 100%;
      display: block;
    }

    .legend {
      display: flex;
      gap: 14px;
      flex-wrap: wrap;
      font-size: 0.85rem;
    }

    .legend .swatch {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 2px;
      margin-right: 4px;
    }

    .trend-line {
      fill: none;
      stroke: var(--completed);
      stroke-width: 2.5;
    }

    .trend-fill {
      fill: rgba(40, 167, 69, 0.1);
      stroke: none;
    }

    .chart-label {
      fill: #6a7680;
      font-size: 10px;
    }

    form.stacked {
      display: grid;
      gap: 12px;
      max-width: 520px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
      font-weight: 600;
    }

    label.check {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    input, select, textarea {
      font: inherit;
      padding: 8px 10px;
      border: 1px solid var(--line);
      border-radius: 8px;
      background: white;
    }

    .is-invalid {
      border-color: var(--danger);
      background: #fdf1ef;
    }

    button {
      font: inherit;
      font-weight: 600;
      border: none;
      border-radius: 8px;
      padding: 9px 16px;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    .filters {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
      align-items: end;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th, td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid var(--line);
    }

    .status-pending { color: #a07800; }
    .status-in-progress { color: var(--in-progress); }
    .status-completed { color: var(--completed); }

    .status-update-btn {
      padding: 5px 12px;
      font-size: 0.85rem;
    }

    .status-line {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: #6a7680;
    }

    .status-line[data-type="error"] { color: var(--danger); }
    .status-line[data-type="ok"] { color: var(--completed); }

    .notices {
      margin: 0;
      padding-left: 20px;
      color: #8a5a00;
    }

    #logo-preview {
      max-height: 64px;
      display: none;
    }
  </style>
</head>
<body>
  <main>
    <nav>
      <a href="/dashboard">Dashboard</a>
      <a href="/work_order">New Work Order</a>
      <a href="/maintenance_log">New Maintenance Log</a>
      <a href="/company_setup">Company Setup</a>
    </nav>
{{BODY}}
  </main>
</body>
</html>
"##;

const DASHBOARD_BODY: &str = r##"    <header>
      <h1>{{COMPANY}}</h1>
      {{NOTICES}}
    </header>

    <section class="panel">
      <div class="card stat">
        <span class="label">Total</span>
        <span id="total-work-orders" class="value">0</span>
      </div>
      <div class="card stat">
        <span class="label">Pending</span>
        <span id="pending-work-orders" class="value">0</span>
      </div>
      <div class="card stat">
        <span class="label">In Progress</span>
        <span id="in-progress-work-orders" class="value">0</span>
      </div>
      <div class="card stat">
        <span class="label">Completed</span>
        <span id="completed-work-orders" class="value">0</span>
      </div>
    </section>

    <section class="card charts">
      <div>
        <svg id="work-order-chart" viewBox="0 0 220 220" role="img" aria-label="Status breakdown"></svg>
        <div class="legend">
          <span><span class="swatch" style="background: var(--pending)"></span>Pending</span>
          <span><span class="swatch" style="background: var(--in-progress)"></span>In Progress</span>
          <span><span class="swatch" style="background: var(--completed)"></span>Completed</span>
        </div>
      </div>
      <svg id="completion-trend-chart" viewBox="0 0 600 220" role="img" aria-label="Completions over the last 30 days"></svg>
    </section>

    <section class="card">
      <form id="filter-form" class="filters">
        <label>Status
          <select name="status">
            <option value="">All</option>
            <option value="Pending">Pending</option>
            <option value="In Progress">In Progress</option>
            <option value="Completed">Completed</option>
          </select>
        </label>
        <label>Priority
          <select name="priority">
            <option value="">All</option>
            <option value="Low">Low</option>
            <option value="Medium">Medium</option>
            <option value="High">High</option>
          </select>
        </label>
        <label>Assigned to
          <input type="text" name="assigned_to" placeholder="anyone" />
        </label>
        <button type="submit">Apply</button>
      </form>

      <table id="work-orders-table">
        <thead>
          <tr>
            <th>ID</th>
            <th>Log</th>
            <th>Status</th>
            <th>Assigned To</th>
            <th>Scheduled</th>
            <th>Priority</th>
            <th>Critical</th>
            <th>Actions</th>
          </tr>
        </thead>
        <tbody></tbody>
      </table>

      <div id="status" class="status-line"></div>
    </section>

    <script>
      (() => {
        const init = (root) => {
          const el = (id) => root.getElementById(id);
          const statusLine = el('status');
          const setStatus = (message, type) => {
            statusLine.textContent = message;
            statusLine.dataset.type = type || '';
          };

          const updateStatCards = (stats) => {
            el('total-work-orders').textContent = stats.total;
            el('pending-work-orders').textContent = stats.pending;
            el('in-progress-work-orders').textContent = stats.in_progress;
            el('completed-work-orders').textContent = stats.completed;
          };

          const STATUS_COLORS = ['#ffc107', '#17a2b8', '#28a745'];

          const renderStatusChart = (stats) => {
            const chart = el('work-order-chart');
            const values = [stats.pending, stats.in_progress, stats.completed];
            const total = values.reduce((sum, value) => sum + value, 0);
            if (!total) {
              chart.innerHTML = '<text class="chart-label" x="110" y="114" text-anchor="middle">No work orders yet</text>';
              return;
            }
            const r = 70;
            const circ = 2 * Math.PI * r;
            let offset = 0;
            let rings = '';
            values.forEach((value, index) => {
              const span = (value / total) * circ;
              rings += `<circle r="${r}" cx="110" cy="110" fill="none"
                stroke="${STATUS_COLORS[index]}" stroke-width="28"
                stroke-dasharray="${span.toFixed(2)} ${(circ - span).toFixed(2)}"
                stroke-dashoffset="${(-offset).toFixed(2)}"
                transform="rotate(-90 110 110)" />`;
              offset += span;
            });
            chart.innerHTML = rings;
          };

          const renderTrendChart = (points) => {
            const chart = el('completion-trend-chart');
            if (!points.length) {
              chart.innerHTML = '';
              return;
            }
            const width = 600;
            const height = 220;
            const padX = 36;
            const padY = 28;
            const max = Math.max(1, ...points.map((point) => point.count));
            const xStep = points.length > 1 ? (width - padX * 2) / (points.length - 1) : 0;
            const x = (index) => padX + index * xStep;
            const y = (count) => height - padY - (count / max) * (height - padY * 2);
            const line = points
              .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.count).toFixed(2)}`)
              .join(' ');
            const fill = `${line} L ${x(points.length - 1).toFixed(2)} ${height - padY} L ${padX} ${height - padY} Z`;
            const labelEvery = Math.ceil(points.length / 6);
            const labels = points
              .map((point, index) => {
                if (index % labelEvery !== 0) {
                  return '';
                }
                return `<text class="chart-label" x="${x(index)}" y="${height - padY + 16}" text-anchor="middle">${point.date.slice(5)}</text>`;
              })
              .join('');
            chart.innerHTML = `<path class="trend-fill" d="${fill}" /><path class="trend-line" d="${line}" />${labels}`;
          };

          const loadStats = async () => {
            const res = await fetch('/api/work_order_stats');
            if (!res.ok) {
              throw new Error('Unable to load work order stats');
            }
            const stats = await res.json();
            updateStatCards(stats);
            renderStatusChart(stats);
          };

          const loadTrend = async () => {
            const res = await fetch('/api/work_order_completion_trend');
            if (!res.ok) {
              throw new Error('Unable to load completion trend');
            }
            renderTrendChart(await res.json());
          };

          const filterForm = el('filter-form');
          const tableBody = el('work-orders-table').querySelector('tbody');
          let inFlight = null;

          const actionFor = (status) => {
            if (status === 'Pending') {
              return { label: 'Start', next: 'In Progress' };
            }
            if (status === 'In Progress') {
              return { label: 'Complete', next: 'Completed' };
            }
            return null;
          };

          const buildRow = (order) => {
            const row = document.createElement('tr');
            const cell = (text) => {
              const td = document.createElement('td');
              td.textContent = text;
              row.appendChild(td);
              return td;
            };
            cell(order.id);
            cell(order.maintenance_log_id);
            cell(order.status).className = 'status-' + order.status.toLowerCase().replace(' ', '-');
            cell(order.assigned_to);
            cell(order.scheduled_date);
            cell(order.priority);
            cell(order.is_critical ? 'Yes' : '');
            const actions = document.createElement('td');
            const action = actionFor(order.status);
            if (action) {
              const button = document.createElement('button');
              button.type = 'button';
              button.className = 'status-update-btn';
              button.dataset.workOrderId = order.id;
              button.dataset.status = action.next;
              button.textContent = action.label;
              actions.appendChild(button);
            }
            row.appendChild(actions);
            return row;
          };

          // Rebuilding the body destroys the old rows and their listeners,
          // so the action buttons are re-bound after every refresh.
          const bindStatusButtons = () => {
            tableBody.querySelectorAll('.status-update-btn').forEach((button) => {
              button.addEventListener('click', () => {
                updateStatus(button.dataset.workOrderId, button.dataset.status);
              });
            });
          };

          const refreshTable = async () => {
            if (inFlight) {
              // A slow superseded response must not clobber a newer one.
              inFlight.abort();
            }
            inFlight = new AbortController();
            const query = new URLSearchParams(new FormData(filterForm));
            let orders;
            try {
              const res = await fetch('/filtered_work_orders?' + query, { signal: inFlight.signal });
              if (!res.ok) {
                throw new Error('Unable to load work orders');
              }
              orders = await res.json();
            } catch (err) {
              if (err.name !== 'AbortError') {
                setStatus(err.message, 'error');
              }
              return;
            }
            tableBody.replaceChildren(...orders.map(buildRow));
            bindStatusButtons();
          };

          const updateStatus = async (workOrderId, newStatus) => {
            let payload;
            try {
              const res = await fetch('/update_work_order_status', {
                method: 'POST',
                headers: { 'content-type': 'application/x-www-form-urlencoded' },
                body: new URLSearchParams({ work_order_id: workOrderId, new_status: newStatus })
              });
              if (!res.ok) {
                throw new Error('Status update request failed');
              }
              payload = await res.json();
            } catch (err) {
              setStatus('Network error: ' + err.message, 'error');
              return;
            }
            if (!payload.success) {
              setStatus('The server rejected the status update.', 'error');
              return;
            }
            setStatus('Work order updated.', 'ok');
            refreshTable();
            loadStats().catch((err) => setStatus(err.message, 'error'));
            loadTrend().catch((err) => setStatus(err.message, 'error'));
          };

          filterForm.addEventListener('submit', (event) => {
            event.preventDefault();
            refreshTable();
          });

          loadStats().catch((err) => setStatus(err.message, 'error'));
          loadTrend().catch((err) => setStatus(err.message, 'error'));
          refreshTable();
        };

        init(document);
      })();
    </script>
"##;

const COMPANY_SETUP_BODY: &str = r##"    <header>
      <h1>Company Setup</h1>
    </header>

    <section class="card">
      <form id="company-setup-form" class="stacked" method="post" action="/company_setup">
        <label>Company Name
          <input type="text" name="name" class="form-control{{C_NAME}}" value="{{NAME}}" required />
        </label>
        <label>Logo URL
          <input type="text" id="logo_url" name="logo_url" class="form-control" value="{{LOGO_URL}}" />
        </label>
        <img id="logo-preview" src="" alt="Logo preview" />
        <label>Contact Information
          <textarea name="contact_info" class="form-control" rows="3">{{CONTACT_INFO}}</textarea>
        </label>
        <button type="submit">Save</button>
      </form>
    </section>

    <script>
      (() => {
        const init = (root) => {
          const form = root.getElementById('company-setup-form');
          const logoUrlInput = root.getElementById('logo_url');
          const logoPreview = root.getElementById('logo-preview');

          const validate = () => {
            let valid = true;
            form.querySelectorAll('[required]').forEach((field) => {
              if (!field.value) {
                valid = false;
                field.classList.add('is-invalid');
              } else {
                field.classList.remove('is-invalid');
              }
            });
            return valid;
          };

          form.addEventListener('submit', (event) => {
            event.preventDefault();
            if (validate()) {
              form.submit();
            }
          });

          const updateLogoPreview = (url) => {
            if (url) {
              logoPreview.src = url;
              logoPreview.style.display = 'block';
            } else {
              logoPreview.src = '';
              logoPreview.style.display = 'none';
            }
          };

          logoUrlInput.addEventListener('input', () => updateLogoPreview(logoUrlInput.value));
          updateLogoPreview(logoUrlInput.value);
        };

        init(document);
      })();
    </script>
"##;

const MAINTENANCE_LOG_BODY: &str = r##"    <header>
      <h1>New Maintenance Log</h1>
    </header>

    <section class="card">
      <form id="maintenance-log-form" class="stacked" method="post" action="/maintenance_log">
        <label>Date
          <input type="date" name="date" class="form-control{{C_DATE}}" required />
        </label>
        <label>Lot Number
          <input type="text" name="lot_number" class="form-control{{C_LOT_NUMBER}}" required />
        </label>
        <label>Contact Details
          <input type="text" name="contact_details" class="form-control{{C_CONTACT_DETAILS}}" required />
        </label>
        <label>Maintenance Class
          <select name="maintenance_class" class="form-control{{C_MAINTENANCE_CLASS}}" required>
            <option value="3MTR">3MTR</option>
            <option value="IAS">IAS</option>
            <option value="Supplier">Supplier</option>
          </select>
        </label>
        <label>Description
          <textarea name="description" class="form-control{{C_DESCRIPTION}}" rows="4" required></textarea>
        </label>
        <label>Allocation
          <input type="text" name="allocation" class="form-control{{C_ALLOCATION}}" required />
        </label>
        <button type="submit">Create Log</button>
      </form>
    </section>

    <script>
      (() => {
        const init = (root) => {
          const form = root.getElementById('maintenance-log-form');

          const validate = () => {
            let valid = true;
            form.querySelectorAll('[required]').forEach((field) => {
              if (!field.value) {
                valid = false;
                field.classList.add('is-invalid');
              } else {
                field.classList.remove('is-invalid');
              }
            });
            return valid;
          };

          form.addEventListener('submit', (event) => {
            event.preventDefault();
            if (validate()) {
              form.submit();
            }
          });
        };

        init(document);
      })();
    </script>
"##;

const WORK_ORDER_BODY: &str = r##"    <header>
      <h1>New Work Order</h1>
    </header>

    <section class="card">
      <form id="work-order-form" class="stacked" method="post" action="/work_order">
        <label>Maintenance Log
          <select name="maintenance_log_id" class="form-control{{C_MAINTENANCE_LOG_ID}}" required>
            <option value="">Select a log</option>
            {{LOG_OPTIONS}}
          </select>
        </label>
        <label>Status
          <select name="status" class="form-control{{C_STATUS}}" required>
            <option value="Pending">Pending</option>
            <option value="In Progress">In Progress</option>
            <option value="Completed">Completed</option>
          </select>
        </label>
        <label>Assigned To
          <input type="text" name="assigned_to" class="form-control{{C_ASSIGNED_TO}}" required />
        </label>
        <label>Scheduled Date
          <input type="date" name="scheduled_date" class="form-control{{C_SCHEDULED_DATE}}" required />
        </label>
        <label>Notes
          <textarea name="notes" class="form-control" rows="3"></textarea>
        </label>
        <label>Priority
          <select name="priority" class="form-control{{C_PRIORITY}}" required>
            <option value="Low">Low</option>
            <option value="Medium" selected>Medium</option>
            <option value="High">High</option>
          </select>
        </label>
        <label class="check">
          <input type="checkbox" name="is_critical" />
          Critical work order
        </label>
        <button type="submit">Create Work Order</button>
      </form>
    </section>

    <script>
      (() => {
        const init = (root) => {
          const form = root.getElementById('work-order-form');

          const validate = () => {
            let valid = true;
            form.querySelectorAll('[required]').forEach((field) => {
              if (!field.value) {
                valid = false;
                field.classList.add('is-invalid');
              } else {
                field.classList.remove('is-invalid');
              }
            });
            return valid;
          };

          form.addEventListener('submit', (event) => {
            event.preventDefault();
            if (validate()) {
              form.submit();
            }
          });
        };

        init(document);
      })();
    </script>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaintenanceLog, WorkOrderForm};
    use crate::validate::validate_work_order;
    use chrono::{NaiveDate, NaiveDateTime};

    #[test]
    fn dashboard_exposes_the_bound_element_ids() {
        let page = render_dashboard(&AppData::default());
        for id in [
            "total-work-orders",
            "pending-work-orders",
            "in-progress-work-orders",
            "completed-work-orders",
            "work-order-chart",
            "completion-trend-chart",
            "filter-form",
            "work-orders-table",
        ] {
            assert!(page.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
    }

    #[test]
    fn dashboard_header_uses_the_company_name() {
        let mut data = AppData::default();
        data.company = Some(Company {
            name: "Smith & Sons".into(),
            logo_url: String::new(),
            contact_info: String::new(),
        });
        let page = render_dashboard(&data);
        assert!(page.contains("Smith &amp; Sons"));
    }

    #[test]
    fn invalid_fields_are_marked_on_re_render() {
        let form = WorkOrderForm {
            status: "Pending".into(),
            priority: "High".into(),
            ..Default::default()
        };
        let page = render_work_order(&AppData::default(), &validate_work_order(&form));
        assert!(page.contains("name=\"assigned_to\" class=\"form-control is-invalid\""));
        assert!(page.contains("name=\"status\" class=\"form-control\""));
        assert!(!page.contains("{{C_"));
    }

    #[test]
    fn work_order_form_lists_maintenance_logs() {
        let mut data = AppData::default();
        data.maintenance_logs.insert(
            3,
            MaintenanceLog {
                id: 3,
                date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                lot_number: "LOT-9".into(),
                contact_details: "x".into(),
                maintenance_class: "IAS".into(),
                description: "pump seal".into(),
                allocation: "bay 2".into(),
                created_at: NaiveDateTime::default(),
            },
        );
        let page = render_work_order(&data, &Default::default());
        assert!(page.contains("<option value=\"3\">#3 LOT-9 (2026-02-01)</option>"));
    }
}
