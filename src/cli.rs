//! Terminal output and interactive shell

use crate::event::MidiEvent;
use crate::model::ObjectId;
use crate::tree::{Forest, GroupBy, NodeId, NodeKind};
use crate::wrapper::{ObjectCollection, ObjectWrapper};
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Print the forest, one line per node, optionally with the events of each object
pub fn render_tree(forest: &mut Forest<'_>, expand: bool, out: &mut dyn Write) -> io::Result<()> {
    let roots = forest.roots().to_vec();
    if roots.is_empty() {
        writeln!(out, "{}", "(no objects)".dimmed())?;
    }
    for root in roots {
        render_node(forest, root, 0, expand, out)?;
    }
    Ok(())
}

fn render_node(
    forest: &mut Forest<'_>,
    id: NodeId,
    depth: usize,
    expand: bool,
    out: &mut dyn Write,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    match forest.kind(id).clone() {
        NodeKind::Group { name } => {
            writeln!(out, "{}{}", indent, name.bold().cyan())?;
        }
        NodeKind::Object { .. } => {
            if let Some(wrapper) = forest.wrapper(id) {
                writeln!(out, "{}{}", indent, object_line(wrapper))?;
            }
            if !expand {
                return Ok(());
            }
        }
        NodeKind::Event { wrapper, event } => {
            let collection = forest.collection();
            let event = &collection.wrappers()[wrapper].events()[event];
            writeln!(out, "{}{}", indent, event_line(event))?;
        }
    }

    let children = forest.children(id).to_vec();
    for child in children {
        render_node(forest, child, depth + 1, expand, out)?;
    }
    Ok(())
}

fn object_line(wrapper: &ObjectWrapper) -> String {
    let count = wrapper.events().len();
    let events = match count {
        0 => "no events".dimmed(),
        1 => "1 event".normal(),
        n => format!("{} events", n).normal(),
    };
    format!(
        "{} [{}] {} ({})",
        wrapper.name().yellow(),
        wrapper.midi_type(),
        wrapper.object_type().to_string().dimmed(),
        events
    )
}

fn event_line(event: &MidiEvent) -> String {
    format!(
        "{} {} dev {} ch {} no {} low {} high {} min {} max {} deb {}",
        event.function_label().green(),
        event.event_type.name().bright_white(),
        event.device_name(),
        event.channel,
        event.number,
        event.low,
        event.high,
        event.min,
        event.max,
        event.debounce_time
    )
}

/// Detailed view of one object
pub fn render_object(
    collection: &ObjectCollection,
    wrapper: &ObjectWrapper,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "{} {}", wrapper.name().bold().yellow(), format!("({})", wrapper.id()).dimmed())?;
    writeln!(out, "  Role:        {}", wrapper.object_type())?;
    writeln!(out, "  Type:        {}", wrapper.midi_type())?;
    writeln!(out, "  ODF section: {}", wrapper.odf_section())?;
    writeln!(out, "  Division:    {}", collection.division_name_of(wrapper))?;
    writeln!(out, "  Panels:      {}", collection.panel_names_of(wrapper))?;
    writeln!(out, "  Events:")?;
    for event in wrapper.events() {
        writeln!(out, "    {}", event_line(event))?;
    }
    if !wrapper.skipped().is_empty() {
        writeln!(out, "  Skipped:")?;
        for skipped in wrapper.skipped() {
            writeln!(out, "    {}", skipped.to_string().red())?;
        }
    }
    Ok(())
}

/// Every pattern without translation, per object
pub fn render_skipped(collection: &ObjectCollection, out: &mut dyn Write) -> io::Result<()> {
    let mut total = 0;
    for wrapper in collection.wrappers() {
        for skipped in wrapper.skipped() {
            writeln!(
                out,
                "{} [{}]: {}",
                wrapper.id().to_string().yellow(),
                wrapper.object_type(),
                skipped
            )?;
            total += 1;
        }
    }
    writeln!(out, "{} skipped patterns", total)?;
    Ok(())
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Group(GroupBy),
    Show,
    Expand,
    Collapse,
    Object(ObjectId),
    Skipped,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let argument = words.next();

        let command = match (name, argument) {
            ("group", Some(mode)) => Command::Group(mode.parse()?),
            ("group", None) => return Err("usage: group <none|panel|division|panel-then-division>".to_string()),
            ("show", None) => Command::Show,
            ("expand", None) => Command::Expand,
            ("collapse", None) => Command::Collapse,
            ("object", Some(id)) => Command::Object(ObjectId::from(id)),
            ("object", None) => return Err("usage: object <id>".to_string()),
            ("skipped", None) => Command::Skipped,
            ("help", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            _ => return Err(format!("unknown command '{}', try 'help'", line.trim())),
        };
        Ok(Some(command))
    }
}

const HELP: &str = "\
Commands:
  group <mode>   regroup: none, panel, division, panel-then-division
  show           print the tree
  expand         show events under objects
  collapse       hide events
  object <id>    details of one object
  skipped        patterns without translation
  help           this text
  quit           leave the shell";

/// Whether the shell keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive state over one collection
pub struct Shell {
    collection: ObjectCollection,
    group_by: GroupBy,
    expand: bool,
}

impl Shell {
    pub fn new(collection: ObjectCollection, group_by: GroupBy, expand: bool) -> Self {
        Self {
            collection,
            group_by,
            expand,
        }
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn is_expanded(&self) -> bool {
        self.expand
    }

    pub fn execute(&mut self, command: Command, out: &mut dyn Write) -> io::Result<Flow> {
        debug!("Shell command: {:?}", command);
        match command {
            Command::Group(group_by) => {
                self.group_by = group_by;
                self.show(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Expand => {
                self.expand = true;
                self.show(out)?;
            }
            Command::Collapse => {
                self.expand = false;
                self.show(out)?;
            }
            Command::Object(id) => match self.collection.find(&id) {
                Some(wrapper) => render_object(&self.collection, wrapper, out)?,
                None => writeln!(out, "{}", format!("No object '{}'", id).red())?,
            },
            Command::Skipped => render_skipped(&self.collection, out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show(&self, out: &mut dyn Write) -> io::Result<()> {
        let mut forest = Forest::build(&self.collection, self.group_by);
        render_tree(&mut forest, self.expand, out)
    }
}

/// Read commands until `quit` or end of input
pub fn run_shell(mut shell: Shell) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut stdout = io::stdout();
    println!("{}", "Type 'help' for commands".dimmed());

    loop {
        match rl.readline("organ> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match Command::parse(&line) {
                    Ok(Some(command)) => {
                        if shell.execute(command, &mut stdout)? == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(message) => println!("{}", message.red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                warn!("Shell input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrganConfig;

    const ORGAN: &str = r#"
divisions:
  - { name: Great, stops: [p8] }
panels:
  - { name: Main, controls: [p8] }
objects:
  - id: p8
    name: Principal
    type: Drawstop
    sender: { kind: button, events: [{ type: ctrl-on, key: 7 }] }
    receiver: { kind: drawstop, events: [{ type: ctrl-change-fixed-on, key: 7 }, { type: note-normal }] }
  - { id: blank, name: Blank, type: Switch }
"#;

    fn shell() -> Shell {
        let config = OrganConfig::parse(ORGAN).expect("valid description");
        Shell::new(config.build_collection(), GroupBy::PanelThenDivision, false)
    }

    fn run(shell: &mut Shell, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let command = Command::parse(line).expect("valid command").expect("not blank");
        let flow = shell.execute(command, &mut out).expect("write to buffer");
        (flow, String::from_utf8(out).expect("utf-8"))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse("group division"), Ok(Some(Command::Group(GroupBy::Division))));
        assert_eq!(Command::parse("object p8"), Ok(Some(Command::Object("p8".into()))));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert!(Command::parse("group").is_err());
        assert!(Command::parse("group shelf").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn test_regroup_and_expand() {
        let mut shell = shell();
        let (_, text) = run(&mut shell, "show");
        assert!(text.contains("Main"));
        assert!(text.contains("No Panel"));
        assert!(!text.contains("Bx Control Change"));

        let (_, text) = run(&mut shell, "group division");
        assert_eq!(shell.group_by(), GroupBy::Division);
        assert!(text.contains("Great"));
        assert!(text.contains("Organ"));

        let (_, text) = run(&mut shell, "expand");
        assert!(shell.is_expanded());
        assert!(text.contains("Bx Control Change"));
    }

    #[test]
    fn test_object_and_skipped_views() {
        let mut shell = shell();
        let (_, text) = run(&mut shell, "object p8");
        assert!(text.contains("Principal"));
        assert!(text.contains("Great"));
        assert!(text.contains("receive #1 (note-normal)"));

        let (_, text) = run(&mut shell, "object nope");
        assert!(text.contains("No object 'nope'"));

        let (_, text) = run(&mut shell, "skipped");
        assert!(text.contains("1 skipped patterns"));
    }

    #[test]
    fn test_quit() {
        let mut shell = shell();
        assert_eq!(run(&mut shell, "quit").0, Flow::Quit);
        assert_eq!(run(&mut shell, "help").0, Flow::Continue);
    }
}
