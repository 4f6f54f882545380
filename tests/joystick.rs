mod common;

mod tests {
    use pico_peripheral_kit::{Direction, Joystick, JoystickConfig, JoystickPins, JoystickState, map_value};

    use crate::common::{MockAdc, MockGpio};

    fn state(x: u16, y: u16) -> JoystickState {
        JoystickState { x, y, button: false }
    }

    #[test]
    fn test_direction_center_and_deadzone() {
        assert_eq!(state(2048, 2048).direction(), Direction::Center);
        assert_eq!(state(2048 + 499, 2048 - 499).direction(), Direction::Center);
        assert_eq!(state(2048 + 500, 2048).direction(), Direction::Center);
    }

    #[test]
    fn test_direction_on_deadzone_edge() {
        assert_eq!(state(2048 + 600, 2048 + 500).direction(), Direction::Center);
        assert_eq!(state(2048 - 600, 2048 - 500).direction(), Direction::Center);
        assert_eq!(state(2048 + 500, 2048 - 600).direction(), Direction::Center);
        assert_eq!(state(2048 + 600, 2048 + 499).direction(), Direction::Right);
        assert_eq!(state(2048 + 501, 2048 + 501).direction(), Direction::UpRight);
    }

    #[test]
    fn test_direction_cardinals() {
        assert_eq!(state(4095, 2048).direction(), Direction::Right);
        assert_eq!(state(0, 2048).direction(), Direction::Left);
        assert_eq!(state(2048, 4095).direction(), Direction::Up);
        assert_eq!(state(2048, 0).direction(), Direction::Down);
    }

    #[test]
    fn test_direction_diagonals() {
        assert_eq!(state(4000, 4000).direction(), Direction::UpRight);
        assert_eq!(state(4000, 100).direction(), Direction::DownRight);
        assert_eq!(state(100, 4000).direction(), Direction::UpLeft);
        assert_eq!(state(100, 100).direction(), Direction::DownLeft);
    }

    #[test]
    fn test_direction_with_custom_config() {
        let config = JoystickConfig {
            center: 2000,
            deadzone: 100,
        };
        assert_eq!(state(2150, 2000).direction_with(&config), Direction::Right);
        assert_eq!(state(2150, 2000).direction(), Direction::Center);
    }

    #[test]
    fn test_read_uses_wired_channels_and_active_low_button() {
        let gpio = MockGpio::new();
        let adc = MockAdc::new([1000, 3000, 0, 0]);
        let mut joystick = Joystick::new(adc, &gpio, JoystickPins::BITDOGLAB);

        assert!(gpio.is_input(22));
        assert!(gpio.has_pull_up(22));

        let released = joystick.read();
        assert_eq!(released, JoystickState { x: 3000, y: 1000, button: false });

        gpio.set_level(22, false);
        assert!(joystick.read().button);

        let adc = joystick.into_inner();
        assert_eq!(adc.selected, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_read_clamps_to_adc_range() {
        let gpio = MockGpio::new();
        let adc = MockAdc::new([u16::MAX, 5000, 0, 0]);
        let mut joystick = Joystick::new(adc, &gpio, JoystickPins::BITDOGLAB);

        assert_eq!(joystick.read_x(), 4095);
        assert_eq!(joystick.read_y(), 4095);
    }

    #[test]
    fn test_map_value() {
        assert_eq!(map_value(0, 0, 4095, -100, 100), -100);
        assert_eq!(map_value(4095, 0, 4095, -100, 100), 100);
        assert_eq!(map_value(2048, 0, 4095, -100, 100), 0);
        assert_eq!(map_value(50, 0, 100, 0, 10), 5);
    }

    #[test]
    fn test_map_value_full_range() {
        assert_eq!(map_value(u16::MAX, 0, u16::MAX, i16::MIN, i16::MAX), i16::MAX);
        assert_eq!(map_value(0, 0, u16::MAX, i16::MIN, i16::MAX), i16::MIN);
        assert_eq!(map_value(u16::MAX, 0, u16::MAX, i16::MAX, i16::MIN), i16::MIN);
    }

    #[test]
    fn test_map_value_clamps_and_handles_empty_range() {
        assert_eq!(map_value(200, 0, 100, 0, 10), 10);
        assert_eq!(map_value(5, 10, 100, 0, 10), 0);
        assert_eq!(map_value(7, 3, 3, -1, 1), -1);
        assert_eq!(map_value(0, 0, 100, 10, -10), 10);
        assert_eq!(map_value(100, 0, 100, 10, -10), -10);
    }
}
