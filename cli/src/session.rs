use std::time::Duration;

use anyhow::Result;
use engine::faces::{self, blank, join};
use engine::{Army, Battle, Dice, Round, Victor};

use crate::screen::{Key, Screen};

const TITLE_ROW: u16 = 0;
const PROMPT_ROW: u16 = 2;
const HEADER_ROW: u16 = 4;
const PAIR_ONE_ROW: u16 = 6;
const PAIR_TWO_ROW: u16 = 12;
const THIRD_DIE_ROW: u16 = 18;
const STATUS_ROW: u16 = 24;
const OUTCOME_ROW: u16 = 27;
const VICTOR_ROW: u16 = 28;

const LINE_WIDTH: usize = 80;

const MODE_HELP: &str = "Hit ' ' to automatically finish battles, 'q' to quit, any other for manual play";
const MANUAL_HELP: &str = "Hit ' ' to continue battle, 'q' to quit, any other to stop";

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub delay: Duration,
    pub dot: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Auto,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Quit,
}

pub struct Session<'a, S: Screen> {
    screen: &'a mut S,
    dice: Dice,
    cfg: SessionConfig,
}

impl<'a, S: Screen> Session<'a, S> {
    pub fn new(screen: &'a mut S, dice: Dice, cfg: SessionConfig) -> Self {
        Self { screen, dice, cfg }
    }

    /// Run engagements until the user quits.
    pub fn run(&mut self) -> Result<()> {
        self.screen.draw(TITLE_ROW, 20, "Welcome to the Risk Battler!")?;
        self.screen.draw(HEADER_ROW, 0, "  Offense    Defense")?;
        self.draw_dice(&[1, 1, 1], &[1, 1])?;

        loop {
            let Some(offense) = self.read_integer(PROMPT_ROW, "Number of offensive troops")? else {
                break;
            };
            let Some(defense) = self.read_integer(PROMPT_ROW, "Number of defensive troops")? else {
                break;
            };

            self.line(PROMPT_ROW, MODE_HELP)?;
            self.line(OUTCOME_ROW, "")?;
            self.line(VICTOR_ROW, "")?;
            let mut battle = Battle::new(Army::new(offense), Army::new(defense));
            self.draw_status(&battle)?;
            self.screen.flush()?;

            let key = self.screen.read_key()?;
            if key.is_quit() {
                break;
            }
            let mode = if key == Key::Char(' ') { Mode::Auto } else { Mode::Manual };
            tracing::info!(offense, defense, ?mode, "battle started");

            match mode {
                Mode::Manual => self.line(PROMPT_ROW, MANUAL_HELP)?,
                Mode::Auto => self.line(PROMPT_ROW, "")?,
            }
            let flow = self.fight(&mut battle, mode)?;
            if mode == Mode::Manual {
                self.line(PROMPT_ROW, "")?;
            }
            self.screen.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }
        tracing::info!("session closed");
        Ok(())
    }

    fn fight(&mut self, battle: &mut Battle, mode: Mode) -> Result<Flow> {
        while battle.action() {
            self.screen.flush()?;
            match mode {
                Mode::Manual => {
                    let key = self.screen.read_key()?;
                    if key.is_quit() {
                        return Ok(Flow::Quit);
                    }
                    if key != Key::Char(' ') {
                        tracing::info!("battle stopped by user");
                        return Ok(Flow::Next);
                    }
                }
                Mode::Auto => self.screen.pause(self.cfg.delay)?,
            }

            let round = battle.attack(&mut self.dice)?;
            self.draw_round(&round)?;
            self.draw_status(battle)?;
            self.line(OUTCOME_ROW, &format!("Offense roll {}", round.describe()))?;
        }

        match battle.victor() {
            Some(Victor::Offense) => self.line(VICTOR_ROW, "The defense is wiped out")?,
            Some(Victor::Defense) => self.line(VICTOR_ROW, "The offense can no longer attack")?,
            None => {}
        }
        Ok(Flow::Next)
    }

    /// Prompt until the user types a positive integer. `None` on Esc.
    fn read_integer(&mut self, row: u16, prompt: &str) -> Result<Option<u32>> {
        let label = format!("{}: ", prompt);
        let start = label.chars().count();
        let mut input = String::new();

        self.line(row, &label)?;
        loop {
            self.screen.cursor(Some((row, (start + input.chars().count()) as u16)))?;
            self.screen.flush()?;
            match self.screen.read_key()? {
                Key::Char(c) => {
                    input.push(c);
                    self.line(row, &format!("{}{}", label, input))?;
                }
                Key::Backspace => {
                    input.pop();
                    self.line(row, &format!("{}{}", label, input))?;
                }
                Key::Enter => match input.trim().parse::<u32>() {
                    Ok(value) if value > 0 => {
                        self.line(row, "")?;
                        self.screen.cursor(None)?;
                        return Ok(Some(value));
                    }
                    _ => {
                        tracing::debug!(%input, "rejected troop count");
                        input.clear();
                        self.line(row, &label)?;
                    }
                },
                Key::Esc => {
                    self.line(row, "")?;
                    self.screen.cursor(None)?;
                    return Ok(None);
                }
                Key::Other => {}
            }
        }
    }

    fn draw_round(&mut self, round: &Round) -> Result<()> {
        self.draw_dice(&round.offense_roll, &round.defense_roll)
    }

    /// Die slots: first pair, second pair (defense shown only when the
    /// offense threw a second die), then the offense's third die.
    fn draw_dice(&mut self, offense: &[u8], defense: &[u8]) -> Result<()> {
        let second_defense = if offense.len() > 1 { defense.get(1) } else { None };
        let pair_one = join(&[self.die(offense.first()), self.die(defense.first())], "");
        let pair_two = join(&[self.die(offense.get(1)), self.die(second_defense)], "");
        let third = self.die(offense.get(2));

        self.screen.draw(PAIR_ONE_ROW, 0, &pair_one)?;
        self.screen.draw(PAIR_TWO_ROW, 0, &pair_two)?;
        self.screen.draw(THIRD_DIE_ROW, 0, &third)
    }

    fn die(&self, value: Option<&u8>) -> String {
        value
            .and_then(|v| faces::face(*v, self.cfg.dot))
            .unwrap_or_else(blank)
    }

    fn draw_status(&mut self, battle: &Battle) -> Result<()> {
        let text = battle.to_string();
        for (offset, line) in (0u16..).zip(text.lines()) {
            self.line(STATUS_ROW + offset, line)?;
        }
        Ok(())
    }

    /// Draw a full-width line so nothing from the previous text is left behind.
    fn line(&mut self, row: u16, text: &str) -> Result<()> {
        self.screen.draw(row, 0, &format!("{:<width$}", text, width = LINE_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::collections::VecDeque;

    /// A screen backed by a grid of characters and a queue of keys.
    struct Scripted {
        rows: Vec<Vec<char>>,
        keys: VecDeque<Key>,
        pauses: usize,
    }

    impl Scripted {
        fn new(keys: &[Key]) -> Self {
            Self {
                rows: vec![Vec::new(); 32],
                keys: keys.iter().copied().collect(),
                pauses: 0,
            }
        }

        fn row(&self, row: usize) -> String {
            self.rows[row].iter().collect::<String>().trim_end().to_string()
        }
    }

    impl Screen for Scripted {
        fn draw(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
            for (offset, line) in text.split('\n').enumerate() {
                let cells = &mut self.rows[row as usize + offset];
                for (i, c) in line.chars().enumerate() {
                    let at = col as usize + i;
                    if cells.len() <= at {
                        cells.resize(at + 1, ' ');
                    }
                    cells[at] = c;
                }
            }
            Ok(())
        }

        fn cursor(&mut self, _at: Option<(u16, u16)>) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn read_key(&mut self) -> Result<Key> {
            match self.keys.pop_front() {
                Some(key) => Ok(key),
                None => bail!("key script exhausted"),
            }
        }

        fn pause(&mut self, _delay: Duration) -> Result<()> {
            self.pauses += 1;
            Ok(())
        }
    }

    fn typed(text: &str) -> Vec<Key> {
        let mut keys: Vec<Key> = text.chars().map(Key::Char).collect();
        keys.push(Key::Enter);
        keys
    }

    fn script(parts: &[Vec<Key>]) -> Vec<Key> {
        parts.concat()
    }

    fn cfg() -> SessionConfig {
        SessionConfig {
            delay: Duration::ZERO,
            dot: 'o',
        }
    }

    #[test]
    fn quit_from_first_prompt() {
        let mut screen = Scripted::new(&[Key::Esc]);
        Session::new(&mut screen, Dice::from_seed(1), cfg()).run().unwrap();
        assert!(screen.row(0).contains("Welcome to the Risk Battler!"));
        assert_eq!(screen.row(4), "  Offense    Defense");
    }

    #[test]
    fn auto_mode_fights_to_the_end() {
        let keys = script(&[typed("10"), typed("5"), vec![Key::Char(' ')], vec![Key::Esc]]);
        let mut screen = Scripted::new(&keys);
        Session::new(&mut screen, Dice::from_seed(42), cfg()).run().unwrap();

        assert!(screen.pauses > 0);
        assert!(screen.row(24).starts_with("Offense: "));
        assert!(screen.row(25).starts_with("Defense: "));
        assert!(screen.row(27).starts_with("Offense roll "));
        let victor = screen.row(28);
        assert!(victor == "The defense is wiped out" || victor == "The offense can no longer attack");
    }

    #[test]
    fn manual_round_shows_dice_and_outcome() {
        // offense [6,5,4], defense [6,3]
        let dice = Dice::from_scripted(vec![4, 6, 5, 3, 6]);
        let keys = script(&[
            typed("10"),
            typed("5"),
            vec![Key::Char('m'), Key::Char(' '), Key::Char('x')],
            vec![Key::Esc],
        ]);
        let mut screen = Scripted::new(&keys);
        Session::new(&mut screen, dice, cfg()).run().unwrap();

        assert_eq!(screen.row(24), "Offense: 9 troops; 1 lost");
        assert_eq!(screen.row(25), "Defense: 4 troops; 1 lost");
        assert_eq!(screen.row(27), "Offense roll Lost and Won");
        // first pair: 6 against 6
        assert_eq!(screen.row(7), " | o   o | | o   o |");
        // second pair: 5 against 3
        assert_eq!(screen.row(13), " | o   o | | o     |");
        // third offense die: 4
        assert_eq!(screen.row(19), " | o   o |");
        assert_eq!(screen.row(28), "");
    }

    #[test]
    fn lone_second_die_clears_defense_slot() {
        // offense 3 troops throws two dice; defense 1 troop throws one
        let dice = Dice::from_scripted(vec![2, 3, 1]);
        let keys = script(&[typed("3"), typed("1"), vec![Key::Char('m'), Key::Char(' ')], vec![Key::Esc]]);
        let mut screen = Scripted::new(&keys);
        Session::new(&mut screen, dice, cfg()).run().unwrap();

        assert_eq!(screen.row(13), " | o     |");
        assert_eq!(screen.row(19), "");
        assert_eq!(screen.row(27), "Offense roll Won");
        assert_eq!(screen.row(28), "The defense is wiped out");
    }

    #[test]
    fn quit_key_ends_manual_battle() {
        let keys = script(&[typed("10"), typed("5"), vec![Key::Char('m'), Key::Char('Q')]]);
        let mut screen = Scripted::new(&keys);
        Session::new(&mut screen, Dice::from_seed(5), cfg()).run().unwrap();
        assert_eq!(screen.row(24), "Offense: 10 troops; 0 lost");
        assert!(screen.keys.is_empty());
    }

    #[test]
    fn quit_instead_of_choosing_a_mode() {
        let keys = script(&[typed("4"), typed("4"), vec![Key::Char('q')]]);
        let mut screen = Scripted::new(&keys);
        Session::new(&mut screen, Dice::from_seed(5), cfg()).run().unwrap();
        assert_eq!(screen.pauses, 0);
        assert_eq!(screen.row(27), "");
    }

    #[test]
    fn bad_troop_counts_are_asked_again() {
        let keys = script(&[
            typed("ten"),
            typed("0"),
            vec![Key::Char('9'), Key::Char('9'), Key::Backspace],
            vec![Key::Enter],
            typed("2"),
            vec![Key::Char('q')],
        ]);
        let mut screen = Scripted::new(&keys);
        Session::new(&mut screen, Dice::from_seed(5), cfg()).run().unwrap();
        assert_eq!(screen.row(24), "Offense: 9 troops; 0 lost");
        assert_eq!(screen.row(25), "Defense: 2 troops; 0 lost");
    }

    #[test]
    fn second_battle_starts_fresh() {
        let keys = script(&[
            typed("3"),
            typed("3"),
            vec![Key::Char('m'), Key::Char('s')],
            typed("6"),
            typed("2"),
            vec![Key::Char('q')],
        ]);
        let mut screen = Scripted::new(&keys);
        Session::new(&mut screen, Dice::from_seed(5), cfg()).run().unwrap();
        assert_eq!(screen.row(24), "Offense: 6 troops; 0 lost");
        assert_eq!(screen.row(25), "Defense: 2 troops; 0 lost");
    }
}
