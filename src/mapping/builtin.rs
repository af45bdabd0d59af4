//! # Built-in Mapping Dataset
//!
//! Controller mappings shipped with padmap, loaded at
//! [`Priority::Default`](super::parser::Priority::Default) when the database
//! is initialized. Entries follow the SDL `gamecontrollerdb.txt` format.

/// Built-in mapping lines, loaded in order.
pub const BUILTIN_MAPPINGS: &[&str] = &[
    "03000000c82d00000090000011010000,8BitDo FC30 Pro,a:b1,b:b0,leftshoulder:b6,leftx:a0,lefty:a1,rightshoulder:b7,x:b4,y:b3,platform:Linux,",
    "05000000c82d00001038000000010000,8Bitdo NES30 Pro,a:b1,b:b0,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b6,lefttrigger:b8,leftx:a0,lefty:a1,rightshoulder:b7,righttrigger:b9,rightx:a2,righty:a3,x:b4,y:b3,platform:Linux,",
    "030000006f0e00001304000000010000,Generic X-Box pad,a:b0,b:b1,back:b6,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Linux,",
    "030000006d0400001dc2000014400000,Logitech F310 Gamepad (XInput),a:b0,b:b1,back:b6,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Linux,",
    "030000006d04000016c2000011010000,Logitech F310 Gamepad (DInput),a:b1,b:b2,back:b8,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b4,lefttrigger:b6,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:b7,rightx:a2,righty:a3,start:b9,x:b0,y:b3,platform:Linux,",
    "030000006d04000018c2000010010000,Logitech RumblePad 2 USB,a:b1,b:b2,back:b8,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b4,lefttrigger:b6,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:b7,rightx:a2,righty:a3,start:b9,x:b0,y:b3,platform:Linux,",
    "030000004c0500006802000011010000,PS3 Controller,a:b0,b:b1,back:b8,leftshoulder:b4,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b9,x:b3,y:b2,platform:Linux,",
    "030000004c050000c405000011810000,PS4 Controller,a:b0,b:b1,back:b8,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b4,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b9,x:b3,y:b2,platform:Linux,",
    "050000004c050000cc09000000810000,PS4 Controller,a:b0,b:b1,back:b8,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b4,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b9,x:b3,y:b2,platform:Linux,",
    "030000004c050000e60c000011810000,PS5 Controller,a:b0,b:b1,back:b8,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b4,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b9,x:b3,y:b2,platform:Linux,",
    "050000007e0500003003000001000000,Nintendo Wii U Pro Controller,a:b0,b:b1,back:b8,leftshoulder:b4,lefttrigger:b6,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:b7,rightx:a2,righty:a3,start:b9,x:b3,y:b2,platform:Linux,",
    "03000000de2800004211000001000000,Steam Controller,a:b0,b:b1,back:b6,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a3,start:b7,x:b2,y:b3,platform:Linux,",
    "030000005e0400008e02000010010000,Xbox 360 Controller,a:b0,b:b1,back:b6,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Linux,",
    "030000005e0400008e02000014010000,Xbox 360 Controller,a:b0,b:b1,back:b6,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Linux,",
    "030000005e040000a102000000010000,Xbox 360 Wireless Receiver,a:b0,b:b1,back:b6,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Linux,",
    "030000005e040000ea02000001030000,Xbox One Wireless Controller,a:b0,b:b1,back:b6,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Linux,",
    "030000005e040000130b000011050000,Xbox Series Controller,a:b0,b:b1,back:b6,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,guide:b8,leftshoulder:b4,leftstick:b9,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Linux,",
    "03000000790000000600000000000000,G-Shark GS-GP702,a:b2,b:b1,back:b8,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b4,lefttrigger:b6,leftx:a0,lefty:a1,rightshoulder:b5,righttrigger:b7,rightx:a2,righty:a4,start:b9,x:b3,y:b0,platform:Windows,",
    "030000005e0400008e02000000000000,Xbox 360 Controller,a:b0,b:b1,back:b6,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,dpup:h0.1,leftshoulder:b4,leftstick:b8,lefttrigger:a2,leftx:a0,lefty:a1,rightshoulder:b5,rightstick:b9,righttrigger:a5,rightx:a3,righty:a4,start:b7,x:b2,y:b3,platform:Mac OS X,",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::capability::Capability;
    use crate::mapping::database::MappingDatabase;
    use crate::mapping::parser::{Mapping, Priority};

    // Descriptor with nothing after its last digit (or axis `~`)
    fn is_complete_descriptor(descriptor: &str) -> bool {
        let unsigned = descriptor
            .strip_prefix(|c: char| c == '+' || c == '-')
            .unwrap_or(descriptor);
        let signed = unsigned.len() != descriptor.len();

        match unsigned.as_bytes() {
            [b'a', d] | [b'a', d, b'~'] => d.is_ascii_digit(),
            [b'b', d] => !signed && d.is_ascii_digit(),
            [b'h', d, b'.', m] => !signed && d.is_ascii_digit() && m.is_ascii_digit(),
            _ => false,
        }
    }

    #[test]
    fn test_builtin_lines_parse() {
        for line in BUILTIN_MAPPINGS {
            let mapping = Mapping::parse(line, Priority::Default)
                .unwrap_or_else(|e| panic!("built-in line failed to parse: {}", e));
            assert_eq!(mapping.guid.len(), 32, "bad guid in {}", line);
            assert!(mapping.platform.is_some(), "no platform in {}", line);
            assert!(!mapping.bindings.is_empty());
        }
    }

    #[test]
    fn test_builtin_guids_are_lowercase_hex() {
        for line in BUILTIN_MAPPINGS {
            let guid = line.split(',').next().unwrap();
            assert!(
                guid.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')),
                "guid {} is not lowercase hex",
                guid
            );
        }
    }

    #[test]
    fn test_builtin_descriptors_fully_consumed() {
        for line in BUILTIN_MAPPINGS {
            for directive in line.split(',').skip(2).filter(|d| !d.is_empty()) {
                let (key, value) = directive.split_once(':').unwrap();
                if key == "platform" || key == "hint" {
                    continue;
                }
                assert!(
                    is_complete_descriptor(value),
                    "descriptor {:?} has trailing characters in {}",
                    directive,
                    line
                );
            }
        }
    }

    #[test]
    fn test_complete_descriptor_check() {
        for good in ["a0", "-a2", "+a5~", "a1~", "b9", "h0.4"] {
            assert!(is_complete_descriptor(good), "{}", good);
        }
        for bad in ["b10", "a12", "h0.12", "h1", "b", "-b1", "x3", ""] {
            assert!(!is_complete_descriptor(bad), "{}", bad);
        }
    }

    #[test]
    fn test_builtin_xbox_buttons_distinct() {
        use crate::device::snapshot::CapabilitySnapshot;
        use crate::resolve::command::{CommandResolver, CommandResult};

        let db = MappingDatabase::initialize("Linux", None);
        let mapping = db.lookup("030000005e0400008e02000014010000").unwrap();
        assert!(!mapping.bindings.contains_key(&Capability::RightStick));

        // xpad: A B X Y TL TR SELECT START MODE THUMBL THUMBR
        let keys = [0x130, 0x131, 0x133, 0x134, 0x136, 0x137, 0x13a, 0x13b, 0x13c, 0x13d, 0x13e];
        let snapshot = CapabilitySnapshot::scan(|c| keys.contains(&c), |c| c <= 0x05 || c == 0x10 || c == 0x11);
        let resolver = CommandResolver::new("/dev/input/event0", Some(mapping), &snapshot);

        assert_eq!(resolver.execute("MAP_BUTTON:b"), CommandResult::Found("BTN_EAST".to_string()));
        assert_eq!(
            resolver.execute("MAP_BUTTON:rightstick"),
            CommandResult::Unsupported("Unsupported gamepad mapping: rightstick".to_string())
        );
    }
}
