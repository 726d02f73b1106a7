use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, Write};
use time::macros::format_description;
use time::Date;

use whistlenote::conversation::ReportConversation;
use whistlenote::i18n::SupportedLanguage;
use whistlenote::models::{Author, MediaRef, Message, ReportStatus, RewardStatus, SiteScope};
use whistlenote::search::{ReportFilter, RewardFilter};
use whistlenote::{fluent_args, AppError, AppState};

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Sites,
    Site(SiteScope),
    Reports(Vec<(String, String)>),
    Rewards(Vec<(String, String)>),
    Reward(String),
    Summary(Option<SiteScope>),
    Open(String),
    Say(Author, String),
    Attach(String, String),
    Status(ReportStatus),
    Grant(i64),
    Lang(SupportedLanguage),
    Show,
    Json,
    Close,
    Quit,
}

const HELP: &str = "\
commands:
  sites                               list sites
  site <id|all>                       select the site that 'open' and 'summary' use
  reports [site= q= status= from= to=] search reports (dates as YYYY-MM-DD)
  rewards [site= q= status= from= to=] search rewards
  reward <id>                         show one reward
  summary [site]                      status counts and monthly incidents
  open <report id>                    open a report of the selected site
  say <text>                          post as manager
  reporter <text>                     post as reporter
  attach <url> <content type>         post a media reference as manager
  status <pending|inProgress|completed>
  grant <amount>                      decide or change the reward
  lang <ko|en>                        language for new system messages
  show | json | close | quit";

fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "sites" => Command::Sites,
        "reports" => Command::Reports(parse_pairs(rest)?),
        "rewards" => Command::Rewards(parse_pairs(rest)?),
        "reward" => Command::Reward(required(rest, "reward id")?.to_string()),
        "site" => Command::Site(required(rest, "site id")?.parse().map_err(anyhow::Error::msg)?),
        "summary" => Command::Summary(if rest.is_empty() {
            None
        } else {
            Some(rest.parse().map_err(anyhow::Error::msg)?)
        }),
        "open" => Command::Open(required(rest, "report id")?.to_string()),
        "say" => Command::Say(Author::Manager, rest.to_string()),
        "reporter" => Command::Say(Author::Reporter, rest.to_string()),
        "attach" => {
            let mut parts = rest.split_whitespace();
            let url = parts.next().ok_or_else(|| anyhow!("missing media url"))?;
            let content_type = parts.next().unwrap_or("image/*");
            Command::Attach(url.to_string(), content_type.to_string())
        }
        "status" => Command::Status(required(rest, "status")?.parse().map_err(anyhow::Error::msg)?),
        "grant" => Command::Grant(
            required(rest, "amount")?
                .replace(['_', ','], "")
                .parse()
                .context("amount must be an integer")?,
        ),
        "lang" => Command::Lang(required(rest, "language")?.parse().map_err(anyhow::Error::msg)?),
        "show" => Command::Show,
        "json" => Command::Json,
        "close" => Command::Close,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}', try 'help'", other),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, what: &str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("missing {}", what);
    }
    Ok(rest)
}

fn parse_pairs(rest: &str) -> Result<Vec<(String, String)>> {
    rest.split_whitespace()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .ok_or_else(|| anyhow!("expected key=value, got '{}'", pair))
        })
        .collect()
}

fn parse_date(value: &str) -> Result<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn report_filter(pairs: &[(String, String)]) -> Result<ReportFilter> {
    let mut filter = ReportFilter::default();
    for (key, value) in pairs {
        match key.as_str() {
            "site" => filter.site = value.parse().map_err(anyhow::Error::msg)?,
            "q" => filter.query = Some(value.clone()),
            "status" => filter.status = Some(value.parse().map_err(anyhow::Error::msg)?),
            "from" => filter.from = Some(parse_date(value)?),
            "to" => filter.to = Some(parse_date(value)?),
            other => bail!("unknown filter '{}'", other),
        }
    }
    Ok(filter)
}

fn reward_filter(pairs: &[(String, String)]) -> Result<RewardFilter> {
    let mut filter = RewardFilter::default();
    for (key, value) in pairs {
        match key.as_str() {
            "site" => filter.site = value.parse().map_err(anyhow::Error::msg)?,
            "q" => filter.query = Some(value.clone()),
            "status" => filter.status = Some(value.parse::<RewardStatus>().map_err(anyhow::Error::msg)?),
            "from" => filter.from = Some(parse_date(value)?),
            "to" => filter.to = Some(parse_date(value)?),
            other => bail!("unknown filter '{}'", other),
        }
    }
    Ok(filter)
}

pub struct Console<'a, W: Write> {
    state: &'a AppState,
    out: W,
    scope: SiteScope,
    current: Option<ReportConversation>,
}

impl<'a, W: Write> Console<'a, W> {
    pub fn new(state: &'a AppState, out: W) -> Self {
        Self {
            state,
            out,
            scope: SiteScope::All,
            current: None,
        }
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "type 'help' for commands")?;
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            match parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    if let Err(e) = self.execute(command) {
                        match e.downcast_ref::<AppError>() {
                            Some(app) if app.is_rejected_input() => {
                                writeln!(self.out, "ignored: {}", app)?
                            }
                            _ => writeln!(self.out, "error: {:#}", e)?,
                        }
                    }
                }
                Err(e) => writeln!(self.out, "error: {:#}", e)?,
            }
            self.out.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        let i18n = self.state.i18n();
        match command {
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Sites => {
                writeln!(self.out, "all\t{}", i18n.get("all-sites"))?;
                for site in self.state.sites()? {
                    writeln!(self.out, "{}\t{}\t{}", site.id, site.name, site.location)?;
                }
            }
            Command::Reports(pairs) => {
                let reports = self.state.search_reports(&report_filter(&pairs)?)?;
                for r in &reports {
                    writeln!(
                        self.out,
                        "#{}\t{}\t{}\t{}\t{}",
                        r.id,
                        r.date,
                        i18n.get(r.status.label_key()),
                        r.site_name,
                        r.report_type
                    )?;
                }
                let count = i18n.get_with_args("result-count", &fluent_args! { "count" => reports.len() });
                writeln!(self.out, "{}", count)?;
            }
            Command::Rewards(pairs) => {
                let rewards = self.state.search_rewards(&reward_filter(&pairs)?)?;
                for r in &rewards {
                    writeln!(
                        self.out,
                        "{}\t{}\t{}\t{}\t{}\t{}",
                        r.id,
                        r.date,
                        i18n.get(r.status.label_key()),
                        r.amount,
                        r.site_name,
                        r.report_title
                    )?;
                }
                let count = i18n.get_with_args("result-count", &fluent_args! { "count" => rewards.len() });
                writeln!(self.out, "{}", count)?;
            }
            Command::Reward(id) => {
                let reward = self.state.find_reward(&id)?;
                writeln!(self.out, "{}", serde_json::to_string_pretty(&reward)?)?;
            }
            Command::Site(scope) => {
                writeln!(self.out, "site: {}", scope)?;
                self.scope = scope;
            }
            Command::Summary(scope) => {
                let scope = scope.unwrap_or_else(|| self.scope.clone());
                let summary = self.state.report_summary(&scope)?;
                for status in ReportStatus::all() {
                    writeln!(self.out, "{}\t{}", i18n.get(status.label_key()), summary.count(*status))?;
                }
                writeln!(self.out, "total\t{}", summary.total)?;
                for ((year, month), count) in self.state.monthly_incidents(&scope)? {
                    writeln!(self.out, "{}-{:02}\t{}", year, month, count)?;
                }
            }
            Command::Open(id) => {
                let conversation = self.state.open_conversation(&self.scope, &id)?;
                for message in conversation.messages() {
                    print_message(&mut self.out, message)?;
                }
                self.current = Some(conversation);
            }
            Command::Say(author, text) => {
                let name = match author {
                    Author::Manager => self.state.manager_name.clone(),
                    _ => i18n.get("reporter-default-name"),
                };
                let message = self.conversation()?.post_text(author, Some(name.as_str()), &text)?.clone();
                print_message(&mut self.out, &message)?;
            }
            Command::Attach(url, content_type) => {
                let name = self.state.manager_name.clone();
                let message = self
                    .conversation()?
                    .post_media(Author::Manager, Some(name.as_str()), MediaRef::new(url, content_type))?
                    .clone();
                print_message(&mut self.out, &message)?;
            }
            Command::Status(status) => {
                let message = self.conversation()?.change_status(status)?.clone();
                print_message(&mut self.out, &message)?;
            }
            Command::Grant(amount) => {
                let message = self.conversation()?.decide_reward(amount)?.clone();
                print_message(&mut self.out, &message)?;
            }
            Command::Lang(language) => {
                self.conversation()?.set_language(language);
                writeln!(self.out, "{}", language.name())?;
            }
            Command::Show => {
                let conversation = self.conversation()?;
                let messages: Vec<Message> = conversation.messages().to_vec();
                for message in &messages {
                    print_message(&mut self.out, message)?;
                }
            }
            Command::Json => {
                let json = serde_json::to_string_pretty(self.conversation()?.state())?;
                writeln!(self.out, "{}", json)?;
            }
            Command::Close => {
                self.current = None;
            }
            Command::Quit => {}
        }
        Ok(())
    }

    fn conversation(&mut self) -> Result<&mut ReportConversation> {
        self.current
            .as_mut()
            .ok_or_else(|| anyhow!("no report is open, use 'open <id>' first"))
    }
}

fn print_message<W: Write>(out: &mut W, message: &Message) -> Result<()> {
    let at = message.created_at.time();
    let stamp = format!("{:02}:{:02}", at.hour(), at.minute());
    let who = match message.author {
        Author::System => "--".to_string(),
        _ => message.name.clone().unwrap_or_else(|| message.author.to_string()),
    };
    if let Some(text) = &message.text {
        writeln!(out, "[{}] {}: {}", stamp, who, text)?;
    }
    if let Some(media) = &message.media {
        writeln!(out, "[{}] {}: <{:?}> {}", stamp, who, media.kind, media.url)?;
    }
    Ok(())
}
