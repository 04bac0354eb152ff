//! Process inquiry: capabilities and MIDI message report

use crate::protocol::{CiHeader, GroupReader, GroupWriter, MessageBody, Result, SubId};

/// Answer to a process inquiry capabilities request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessCapabilitiesReply {
    /// Common header
    pub header: CiHeader,
    /// Supported process inquiry features bitmap
    pub supported_features: u8,
}

impl MessageBody for ProcessCapabilitiesReply {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        1
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_u8(self.supported_features)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(Self {
            header,
            supported_features: reader.get_u8()?,
        })
    }
}

/// Request a report of the MIDI messages that set the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageReport {
    /// Common header
    pub header: CiHeader,
    /// Message data control
    pub data_control: u8,
    /// Requested system message types
    pub system_messages: u8,
    /// Requested other message types
    pub other_messages: u8,
    /// Requested channel controller message types
    pub channel_controller_messages: u8,
    /// Requested note data message types
    pub note_data_messages: u8,
}

impl MessageBody for MessageReport {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        5
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_bytes(&[
            self.data_control,
            self.system_messages,
            self.other_messages,
            self.channel_controller_messages,
            self.note_data_messages,
        ])
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let [data_control, system_messages, other_messages, channel_controller_messages, note_data_messages] =
            reader.get_array()?;
        Ok(Self {
            header,
            data_control,
            system_messages,
            other_messages,
            channel_controller_messages,
            note_data_messages,
        })
    }
}

/// Message types the responder will report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageReportReply {
    /// Common header
    pub header: CiHeader,
    /// System message types
    pub system_messages: u8,
    /// Other message types
    pub other_messages: u8,
    /// Channel controller message types
    pub channel_controller_messages: u8,
    /// Note data message types
    pub note_data_messages: u8,
}

impl MessageBody for MessageReportReply {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        4
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_bytes(&[
            self.system_messages,
            self.other_messages,
            self.channel_controller_messages,
            self.note_data_messages,
        ])
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let [system_messages, other_messages, channel_controller_messages, note_data_messages] =
            reader.get_array()?;
        Ok(Self {
            header,
            system_messages,
            other_messages,
            channel_controller_messages,
            note_data_messages,
        })
    }
}

message_functions! {
    ProcessCapabilities ("process inquiry capabilities"): CiHeader =>
        put_process_capabilities, get_process_capabilities, is_process_capabilities;
    ProcessCapabilitiesReply ("process inquiry capabilities reply"): ProcessCapabilitiesReply =>
        put_process_capabilities_reply, get_process_capabilities_reply, is_process_capabilities_reply;
    MessageReport ("MIDI message report inquiry"): MessageReport =>
        put_message_report, get_message_report, is_message_report;
    MessageReportReply ("MIDI message report reply"): MessageReportReply =>
        put_message_report_reply, get_message_report_reply, is_message_report_reply;
    EndOfMessageReport ("end of MIDI message report"): CiHeader =>
        put_end_of_message_report, get_end_of_message_report, is_end_of_message_report;
}
