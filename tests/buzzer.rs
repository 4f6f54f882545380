mod common;

mod tests {
    use embassy_time::{Duration, Instant};
    use pico_peripheral_kit::buzzer::{BEEP_GAP, MAX_LAG};
    use pico_peripheral_kit::{MelodyPlayer, Note, Tone, beep_pattern};

    use crate::common::{BuzzerEvent, MockBuzzer};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn at(value: u64) -> Instant {
        Instant::from_millis(value)
    }

    #[test]
    fn test_note_frequencies() {
        assert_eq!(Note::A4.frequency(), 440);
        assert_eq!(Note::A3.frequency(), 220);
        assert_eq!(Note::C5.frequency(), 523);
        assert_eq!(Note::E5.frequency(), 659);
        assert_eq!(Note::C4.frequency(), 262);
    }

    #[test]
    fn test_note_tone() {
        assert_eq!(Note::A4.tone(ms(200)), Tone::new(440, ms(200)));
        assert!(Tone::rest(ms(10)).is_rest());
        assert!(!Note::A4.tone(ms(10)).is_rest());
    }

    #[test]
    fn test_melody_steps_and_rests() {
        let melody = [Tone::new(523, ms(200)), Tone::rest(ms(100)), Tone::new(659, ms(300))];
        let mut player = MelodyPlayer::new(&melody);
        let mut buzzer = MockBuzzer::default();

        assert_eq!(player.start(at(0), &mut buzzer), Some(at(200)));
        assert!(player.is_playing());
        assert_eq!(player.position(), Some(0));

        // Early tick keeps the current step.
        assert_eq!(player.tick(at(150), &mut buzzer), Some(at(200)));

        assert_eq!(player.tick(at(200), &mut buzzer), Some(at(300)));
        assert_eq!(player.tick(at(300), &mut buzzer), Some(at(600)));
        assert_eq!(player.position(), Some(2));
        assert_eq!(player.tick(at(600), &mut buzzer), None);
        assert!(!player.is_playing());
        assert_eq!(player.tick(at(700), &mut buzzer), None);

        assert_eq!(
            buzzer.events,
            vec![
                BuzzerEvent::Start(523),
                BuzzerEvent::Stop,
                BuzzerEvent::Start(659),
                BuzzerEvent::Stop,
            ]
        );
    }

    #[test]
    fn test_late_tick_restarts_from_now() {
        let melody = [Tone::new(440, ms(100)), Tone::new(880, ms(100))];
        let mut player = MelodyPlayer::new(&melody);
        let mut buzzer = MockBuzzer::default();

        player.start(at(0), &mut buzzer);
        let late = at(100) + MAX_LAG + ms(10);
        assert_eq!(player.tick(late, &mut buzzer), Some(late + ms(100)));
    }

    #[test]
    fn test_slightly_late_tick_keeps_schedule() {
        let melody = [Tone::new(440, ms(100)), Tone::new(880, ms(100))];
        let mut player = MelodyPlayer::new(&melody);
        let mut buzzer = MockBuzzer::default();

        player.start(at(0), &mut buzzer);
        assert_eq!(player.tick(at(110), &mut buzzer), Some(at(200)));
    }

    #[test]
    fn test_empty_melody_and_stop() {
        let mut buzzer = MockBuzzer::default();
        let mut empty = MelodyPlayer::new(&[]);
        assert_eq!(empty.start(at(0), &mut buzzer), None);
        assert!(!empty.is_playing());

        let melody = [Tone::new(440, ms(1_000))];
        let mut player = MelodyPlayer::new(&melody);
        player.start(at(0), &mut buzzer);
        player.stop(&mut buzzer);
        assert!(!player.is_playing());
        assert_eq!(buzzer.events.last(), Some(&BuzzerEvent::Stop));
    }

    #[test]
    fn test_beep_pattern() {
        let pattern = beep_pattern::<8>(1_000, ms(100), 3);
        assert_eq!(pattern.len(), 6);
        assert_eq!(pattern[0], Tone::new(1_000, ms(100)));
        assert_eq!(pattern[1], Tone::rest(BEEP_GAP));

        let truncated = beep_pattern::<3>(1_000, ms(100), 3);
        assert_eq!(truncated.len(), 3);
    }
}
