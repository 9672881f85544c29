use std::io::Write;

use spingame_core::{reels_to_string, Cue, CueError, CuePlayer, GameState, Wager, CURRENCY};

/// Cues as tagged lines on stderr, with a bell on wins.
pub struct TerminalCues<W: Write> {
    out: W,
}

impl<W: Write> TerminalCues<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalCues<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> CuePlayer for TerminalCues<W> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        let bell = if cue == Cue::Win { "\x07" } else { "" };
        writeln!(self.out, "{bell}♪ {cue}")
            .and_then(|_| self.out.flush())
            .map_err(|e| CueError::Playback(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Spin,
    Bet(Wager),
    Mute,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let cmd = words.next().unwrap_or("spin").to_ascii_lowercase();
    match cmd.as_str() {
        "spin" | "s" => Ok(Command::Spin),
        "mute" | "m" => Ok(Command::Mute),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "bet" | "b" => {
            let raw = words
                .next()
                .ok_or_else(|| "usage: bet <10|50|100|500>".to_string())?;
            let amount: u64 = raw
                .parse()
                .map_err(|_| format!("not a number: {raw}"))?;
            Wager::try_from(amount)
                .map(Command::Bet)
                .map_err(|e| e.to_string())
        }
        other => Err(format!("unknown command: {other} (try help)")),
    }
}

pub const HELP: &str = "commands: spin (or enter), bet <10|50|100|500>, mute, help, quit";

/// Full panel shown while idle.
pub fn render_panel(state: &GameState) -> String {
    let mut lines = Vec::new();
    let sound = if state.muted { "muted" } else { "sound on" };
    lines.push(format!("{} {CURRENCY}  ({sound})", state.balance));
    lines.push(format!("[ {} ]", reels_to_string(&state.reels)));
    let wagers: Vec<String> = Wager::ALL
        .iter()
        .map(|w| {
            if *w == state.wager {
                format!("[{w}]")
            } else {
                format!(" {w} ")
            }
        })
        .collect();
    lines.push(format!("bet: {} {CURRENCY}", wagers.join(" ")));
    let button = if state.spinning {
        "Spinning..."
    } else if state.can_spin() {
        "SPIN"
    } else {
        "SPIN (disabled: balance too low)"
    };
    lines.push(button.to_string());
    if state.last_win > 0 {
        lines.push(format!("You won {} {CURRENCY}!", state.last_win));
    }
    lines.join("\n")
}

/// Single overwritable line shown while the reels shuffle.
pub fn render_shuffle(state: &GameState) -> String {
    format!("\r[ {} ] Spinning...", reels_to_string(&state.reels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spingame_core::Symbol;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(""), Ok(Command::Spin));
        assert_eq!(parse_command("  SPIN "), Ok(Command::Spin));
        assert_eq!(parse_command("bet 500"), Ok(Command::Bet(Wager::FiveHundred)));
        assert_eq!(parse_command("b 10"), Ok(Command::Bet(Wager::Ten)));
        assert_eq!(parse_command("m"), Ok(Command::Mute));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert!(parse_command("bet 25").is_err());
        assert!(parse_command("bet ten").is_err());
        assert!(parse_command("bet").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn panel_marks_active_wager_and_banner() {
        let mut state = GameState {
            wager: Wager::Fifty,
            last_win: 100,
            ..GameState::default()
        };
        let panel = render_panel(&state);
        assert!(panel.contains("1000 MODS"));
        assert!(panel.contains("[50]"));
        assert!(panel.contains(" 10 "));
        assert!(panel.contains("You won 100 MODS!"));

        state.last_win = 0;
        state.balance = 20;
        let panel = render_panel(&state);
        assert!(!panel.contains("You won"));
        assert!(panel.contains("disabled"));
    }

    #[test]
    fn shuffle_line_shows_reels() {
        let state = GameState {
            reels: [Symbol::Star, Symbol::Crown, Symbol::Star],
            spinning: true,
            ..GameState::default()
        };
        assert_eq!(render_shuffle(&state), "\r[ ⭐ 👑 ⭐ ] Spinning...");
    }

    #[test]
    fn terminal_cues_write_lines() {
        let mut cues = TerminalCues::new(Vec::new());
        cues.play(Cue::Spin).unwrap();
        cues.play(Cue::Win).unwrap();
        let text = String::from_utf8(cues.out).unwrap();
        assert_eq!(text, "♪ spin\n\x07♪ win\n");
    }
}
