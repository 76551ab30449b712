use crate::models::{Notice, NoticeLevel, PageState, VoteStatus};
use crate::stats::format_percent;

pub fn render_index(page: &PageState, notice: Option<&Notice>) -> String {
    let disabled = if page.can_vote { "" } else { "disabled" };
    let results_hidden = if page.stats.total_votes > 0 { "" } else { "hidden" };
    let (notice_level, notice_text) = match notice {
        Some(notice) => (
            level_key(notice.level),
            format!("{} {}", notice.title, notice.message),
        ),
        None => ("", String::new()),
    };
    INDEX_HTML
        .replace("{{TOTAL}}", &page.stats.total_votes.to_string())
        .replace("{{BOY}}", &page.stats.boy_votes.to_string())
        .replace("{{GIRL}}", &page.stats.girl_votes.to_string())
        .replace("{{BOY_PCT}}", &format_percent(page.boy_percent))
        .replace("{{GIRL_PCT}}", &format_percent(page.girl_percent))
        .replace("{{STATUS}}", status_key(page.status))
        .replace("{{DISABLED}}", disabled)
        .replace("{{RESULTS_HIDDEN}}", results_hidden)
        .replace("{{NOTICE_LEVEL}}", notice_level)
        .replace("{{NOTICE}}", &notice_text)
}

fn level_key(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    }
}

fn status_key(status: VoteStatus) -> &'static str {
    match status {
        VoteStatus::NotVoted => "not_voted",
        VoteStatus::Pending => "pending",
        VoteStatus::Voted => "voted",
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Gender Party!</title>
  <style>
    :root {
      --pink: #ff69b4;
      --blue: #87ceeb;
      --gold: #ffd700;
      --ink: #2b2a28;
      --card: rgba(255, 255, 255, 0.85);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #fdf2f8, #eff6ff 50%, #faf5ff);
      color: var(--ink);
      font-family: "Open Sans", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      display: grid;
      gap: 28px;
    }

    h1, h2 {
      font-family: "Montserrat", "Georgia", serif;
      text-align: center;
      margin: 0;
    }

    .card {
      background: var(--card);
      border: 3px solid var(--gold);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    .details {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 18px;
    }

    .program li {
      list-style: none;
      padding: 10px 0;
    }

    .program strong {
      display: inline-block;
      width: 64px;
    }

    .actions {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 16px;
      margin: 20px 0;
    }

    button {
      border: none;
      border-radius: 16px;
      color: #fff;
      font-size: 1.4rem;
      font-weight: 700;
      height: 80px;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.5;
      cursor: default;
    }

    .btn-boy {
      background: linear-gradient(90deg, #60a5fa, #2563eb);
    }

    .btn-girl {
      background: linear-gradient(90deg, #f472b6, #db2777);
    }

    .bar {
      height: 20px;
      border-radius: 10px;
      overflow: hidden;
      background: #eee;
      margin: 6px 0 14px;
    }

    .bar span {
      display: block;
      height: 100%;
    }

    #boy-bar {
      background: #2563eb;
    }

    #girl-bar {
      background: #db2777;
    }

    .status {
      min-height: 1.4em;
      text-align: center;
    }

    .status[data-type="error"] {
      color: #b91c1c;
    }
  </style>
</head>
<body>
  <main class="app" data-status="{{STATUS}}">
    <header>
      <h1>Gender Party!</h1>
      <p style="text-align:center">Soon we will find out who is coming into the world!</p>
    </header>

    <section class="card">
      <h2>About the event</h2>
      <p>We are happy to invite you to a celebration where together we will learn our baby's gender.
        A day full of surprises, joy and a little magic.</p>
    </section>

    <section class="details">
      <div class="card">
        <h2>Date</h2>
        <p>December 15, 2024, 18:00</p>
      </div>
      <div class="card">
        <h2>Place</h2>
        <p>Banquet hall "Raduga"<br />10 Prazdnichnaya St.</p>
      </div>
    </section>

    <section class="card">
      <h2>Program</h2>
      <ul class="program">
        <li><strong>18:00</strong> Guests arrive, welcome drinks</li>
        <li><strong>18:30</strong> Buffet</li>
        <li><strong>19:00</strong> Games and contests</li>
        <li><strong>19:30</strong> The big moment: the gender reveal!</li>
        <li><strong>20:00</strong> Dancing and fun</li>
      </ul>
    </section>

    <section class="card">
      <h2>Vote for the baby's gender!</h2>
      <div class="actions">
        <form id="boy-form" method="post" action="/vote/boy">
          <button class="btn-boy" type="submit" {{DISABLED}}>Boy</button>
        </form>
        <form id="girl-form" method="post" action="/vote/girl">
          <button class="btn-girl" type="submit" {{DISABLED}}>Girl</button>
        </form>
      </div>
      <div class="status" id="status" data-type="{{NOTICE_LEVEL}}">{{NOTICE}}</div>
      <div id="results" {{RESULTS_HIDDEN}}>
        <p style="text-align:center">Votes so far: <strong id="total">{{TOTAL}}</strong></p>
        <div>Boy: <span id="boy-count">{{BOY}}</span> (<span id="boy-pct">{{BOY_PCT}}</span>%)</div>
        <div class="bar"><span id="boy-bar" style="width: {{BOY_PCT}}%"></span></div>
        <div>Girl: <span id="girl-count">{{GIRL}}</span> (<span id="girl-pct">{{GIRL_PCT}}</span>%)</div>
        <div class="bar"><span id="girl-bar" style="width: {{GIRL_PCT}}%"></span></div>
      </div>
    </section>

    <footer>
      <p style="text-align:center">We look forward to seeing you at the party!<br />With love, the parents-to-be</p>
    </footer>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const resultsEl = document.getElementById('results');
    const buttons = Array.from(document.querySelectorAll('.actions button'));

    const setStatus = (notice) => {
      statusEl.textContent = notice ? `${notice.title} ${notice.message}` : '';
      statusEl.dataset.type = notice ? notice.level : '';
    };

    const updateUI = (state) => {
      const boyPct = state.boy_percent.toFixed(1);
      const girlPct = state.girl_percent.toFixed(1);
      document.getElementById('total').textContent = state.stats.total_votes;
      document.getElementById('boy-count').textContent = state.stats.boy_votes;
      document.getElementById('girl-count').textContent = state.stats.girl_votes;
      document.getElementById('boy-pct').textContent = boyPct;
      document.getElementById('girl-pct').textContent = girlPct;
      document.getElementById('boy-bar').style.width = `${boyPct}%`;
      document.getElementById('girl-bar').style.width = `${girlPct}%`;
      resultsEl.hidden = state.stats.total_votes === 0;
      buttons.forEach((button) => {
        button.disabled = !state.can_vote;
      });
    };

    const refresh = async () => {
      const res = await fetch('/api/state');
      if (res.ok) {
        updateUI(await res.json());
      }
    };

    const send = async (voteType) => {
      buttons.forEach((button) => {
        button.disabled = true;
      });
      const res = await fetch('/api/vote', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ vote_type: voteType })
      });
      const body = await res.json();
      if (res.ok) {
        setStatus(body.notice);
        updateUI(body.state);
      } else {
        setStatus(body);
        await refresh();
      }
    };

    ['boy', 'girl'].forEach((voteType) => {
      document.getElementById(`${voteType}-form`).addEventListener('submit', (event) => {
        event.preventDefault();
        send(voteType).catch(() => {
          setStatus({ level: 'error', title: 'Error', message: 'Could not send your vote. Please try again.' });
          refresh().catch(() => {});
        });
      });
    });

    setInterval(() => refresh().catch(() => {}), 5000);
  </script>
</body>
</html>
"#;
