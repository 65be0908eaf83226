// src/controllers/osc.rs
//
// Remote control over OSC

use crate::controllers::PipeCommand;
use crate::error::{PipesError, PipesResult};
use log::warn;
use nannou_osc as osc;

pub struct OscController {
    command_queue: Vec<PipeCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> PipesResult<Self> {
        let receiver = osc::receiver(port).map_err(|e| PipesError::Osc(e.to_string()))?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message.addr, &message.args) {
                    Some(command) => self.command_queue.push(command),
                    None => warn!("Unknown OSC message: {} {:?}", message.addr, message.args),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<PipeCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub fn parse_message(addr: &str, args: &[osc::Type]) -> Option<PipeCommand> {
    match (addr, args) {
        ("/pipes/play", []) => Some(PipeCommand::Play),
        ("/pipes/pause", []) => Some(PipeCommand::Pause),
        ("/pipes/toggle", []) => Some(PipeCommand::TogglePlaying),
        ("/pipes/clear", []) => Some(PipeCommand::Clear),
        ("/pipes/collision", [osc::Type::Int(setting)]) => {
            Some(PipeCommand::SetCollision(*setting != 0))
        }
        ("/pipes/collision", []) => Some(PipeCommand::ToggleCollision),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message() {
        let tests = vec![
            ("/pipes/play", vec![], Some(PipeCommand::Play)),
            ("/pipes/pause", vec![], Some(PipeCommand::Pause)),
            ("/pipes/toggle", vec![], Some(PipeCommand::TogglePlaying)),
            ("/pipes/clear", vec![], Some(PipeCommand::Clear)),
            ("/pipes/collision", vec![osc::Type::Int(1)], Some(PipeCommand::SetCollision(true))),
            ("/pipes/collision", vec![osc::Type::Int(0)], Some(PipeCommand::SetCollision(false))),
            ("/pipes/collision", vec![], Some(PipeCommand::ToggleCollision)),
            ("/pipes/collision", vec![osc::Type::Float(1.0)], None),
            ("/pipes/rewind", vec![], None),
        ];

        for (addr, args, expected) in tests {
            assert_eq!(parse_message(addr, &args), expected, "Failed for {}", addr);
        }
    }
}
