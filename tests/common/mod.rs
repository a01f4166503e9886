//! Shared fixture builders for the integration test suite: bit-exact
//! secondary header packing and full-packet assembly.

#![allow(dead_code)]

/// Every secondary-header field this suite needs to vary, defaulting to
/// zero. Construct with `..Default::default()`.
#[derive(Clone, Copy)]
pub struct SecondaryFields {
    pub coarse_time: u32,
    pub fine_time: u16,
    pub sync_marker: u32,
    pub data_take_id: u32,
    pub ecc_number: u8,
    pub test_mode: u8,
    pub rx_channel_id: u8,
    pub space_packet_count: u32,
    pub pri_count: u32,
    pub subcom_counter: u8,
    pub subcom_data_word: u16,
    pub error_flag: u8,
    pub baq_mode: u8,
    pub baq_block_length: u8,
    pub swst: u32,
    pub swl: u32,
    pub pri: u32,
    pub chirp_ramp_rate_sign: u8,
    pub chirp_ramp_rate_mag: u32,
    pub chirp_start_freq_sign: u8,
    pub chirp_start_freq_mag: u32,
    pub pulse_length: u32,
    pub polarisation: u8,
    pub temperature_compensation: u8,
    pub sas_ssb_flag: u8,
    pub cal_mode: u8,
    pub signal_type: u8,
    pub swath_number: u8,
    pub num_quads: u16,
    pub range_decimation: u8,
    pub azimuth_beam_address: u16,
    pub elevation_beam_address: u16,
}

impl Default for SecondaryFields {
    fn default() -> Self {
        Self {
            coarse_time: 0,
            fine_time: 0,
            sync_marker: 0x352EF853,
            data_take_id: 0,
            ecc_number: 0,
            test_mode: 0,
            rx_channel_id: 0,
            space_packet_count: 0,
            pri_count: 0,
            subcom_counter: 0,
            subcom_data_word: 0,
            error_flag: 0,
            baq_mode: 0,
            baq_block_length: 0,
            swst: 0,
            swl: 0,
            pri: 0,
            chirp_ramp_rate_sign: 0,
            chirp_ramp_rate_mag: 0,
            chirp_start_freq_sign: 0,
            chirp_start_freq_mag: 0,
            pulse_length: 0,
            polarisation: 0,
            temperature_compensation: 0,
            sas_ssb_flag: 0,
            cal_mode: 0,
            signal_type: 0,
            swath_number: 0,
            num_quads: 0,
            range_decimation: 0,
            azimuth_beam_address: 0,
            elevation_beam_address: 0,
        }
    }
}

pub fn pack_secondary(f: &SecondaryFields) -> [u8; 62] {
    let mut out = [0u8; 62];
    let mut bit_pos = 0usize;
    let mut push = |value: u64, n: usize| {
        for i in 0..n {
            let bit = (value >> (n - 1 - i)) & 1;
            let byte_idx = bit_pos / 8;
            let bit_in_byte = 7 - (bit_pos % 8);
            out[byte_idx] |= (bit as u8) << bit_in_byte;
            bit_pos += 1;
        }
    };

    push(f.coarse_time as u64, 32);
    push(f.fine_time as u64, 16);
    push(f.sync_marker as u64, 32);
    push(f.data_take_id as u64, 32);
    push(f.ecc_number as u64, 8);
    push(f.test_mode as u64, 3);
    push(f.rx_channel_id as u64, 5);
    push(f.space_packet_count as u64, 32);
    push(f.pri_count as u64, 32);
    let subcom_counter_raw = if f.subcom_counter == 64 { 0 } else { f.subcom_counter };
    push(subcom_counter_raw as u64, 6);
    push(f.subcom_data_word as u64, 16);
    push(f.error_flag as u64, 1);
    push(f.baq_mode as u64, 5);
    push(f.baq_block_length as u64, 8);
    push(0, 3); // reserved
    push(f.swst as u64, 24);
    push(f.swl as u64, 24);
    push(f.pri as u64, 24);
    push(f.chirp_ramp_rate_sign as u64, 1);
    push(f.chirp_ramp_rate_mag as u64, 21);
    push(f.chirp_start_freq_sign as u64, 1);
    push(f.chirp_start_freq_mag as u64, 21);
    push(f.pulse_length as u64, 24);
    push(f.polarisation as u64, 3);
    push(f.temperature_compensation as u64, 2);
    push(f.sas_ssb_flag as u64, 1);
    push(f.cal_mode as u64, 4);
    push(f.signal_type as u64, 4);
    push(f.swath_number as u64, 8);
    push(f.num_quads as u64, 16);
    push(f.range_decimation as u64, 5);
    push(f.azimuth_beam_address as u64, 16);
    push(f.elevation_beam_address as u64, 16);
    assert_eq!(bit_pos, 446);
    out
}

/// Assemble a full packet: 6-byte primary header + 62-byte secondary header
/// + `sample_payload`.
pub fn build_packet(fields: &SecondaryFields, sample_payload: &[u8]) -> Vec<u8> {
    let total_payload_len = 62 + sample_payload.len();
    let data_length_field = (total_payload_len - 1) as u16;

    let mut primary = [0u8; 6];
    primary[0] = 0b0000_1000; // version=0, type=0 (telemetry), secondary_header_flag=1
    primary[2] = 0b1100_0000; // sequence_flags = unsegmented (0b11)
    primary[4..6].copy_from_slice(&data_length_field.to_be_bytes());

    let mut packet = Vec::with_capacity(6 + total_payload_len);
    packet.extend_from_slice(&primary);
    packet.extend_from_slice(&pack_secondary(fields));
    packet.extend_from_slice(sample_payload);
    packet
}

/// Packs one 16-bit Bypass channel word: sign bit + 9-bit magnitude,
/// left-justified in the 16-bit word (top 10 bits), matching the format's
/// per-channel word alignment.
pub fn bypass_word(sign: u8, magnitude: u16) -> [u8; 2] {
    let value: u16 = ((sign as u16 & 1) << 9) | (magnitude & 0x1FF);
    (value << 6).to_be_bytes()
}

/// Builds a Bypass-mode payload of `num_quads` quads, with every channel's
/// samples set to the same `(sign, magnitude)`.
pub fn bypass_payload(num_quads: usize, sign: u8, magnitude: u16) -> Vec<u8> {
    let word = bypass_word(sign, magnitude);
    let mut payload = Vec::with_capacity(num_quads * 4 * 2);
    for _ in 0..4 {
        for _ in 0..num_quads {
            payload.extend_from_slice(&word);
        }
    }
    payload
}
