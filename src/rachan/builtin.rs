//! # Rawave Channel
//! Rawave channel stresses the baseband codec with an open-air link: a single delayed and
//! attenuated path (SPEED_OF_SOUND time of flight, exp(-eta * d) attenuation), white Gaussian
//! noise calibrated to a transmitter SNR over the channel bandwidth, and a tone on another
//! channel as out-of-band interference. The channel plan (CHANNELS) spans 800 Hz to 5.2 kHz.
//! Channel ids start at 1; slot 0 and slot CHANNELS.len() + 1 are reserved.

use super::{ChannelDescriptor, ChannelTable};

pub const SPEED_OF_SOUND: f64 = 340.0;
pub const PADDING_DURATION: f64 = 0.5;

pub const DEFAULT_SNR: f64 = 20.0;
pub const DEFAULT_ETA: f64 = 0.25;
pub const DEFAULT_MAX_DISTANCE: f64 = 5.0;

pub const INTERFERENCE_MEAN: f64 = 1.0;
pub const INTERFERENCE_STD: f64 = 0.2;

pub const CHANNELS: [ChannelDescriptor; 20] = [
    ChannelDescriptor::new(900.0, 1100.0, 30.0),
    ChannelDescriptor::new(1150.0, 1250.0, 33.0),
    ChannelDescriptor::new(1300.0, 1500.0, 27.0),
    ChannelDescriptor::new(1550.0, 1650.0, 33.0),
    ChannelDescriptor::new(1725.0, 1875.0, 33.0),
    ChannelDescriptor::new(1950.0, 2050.0, 33.0),
    ChannelDescriptor::new(2100.0, 2300.0, 30.0),
    ChannelDescriptor::new(2400.0, 2600.0, 27.0),
    ChannelDescriptor::new(2700.0, 2900.0, 30.0),
    ChannelDescriptor::new(3050.0, 3150.0, 33.0),
    ChannelDescriptor::new(3200.0, 3400.0, 33.0),
    ChannelDescriptor::new(3475.0, 3525.0, 27.0),
    ChannelDescriptor::new(3550.0, 3650.0, 33.0),
    ChannelDescriptor::new(3750.0, 3850.0, 30.0),
    ChannelDescriptor::new(3900.0, 4100.0, 30.0),
    ChannelDescriptor::new(4150.0, 4250.0, 33.0),
    ChannelDescriptor::new(4300.0, 4500.0, 27.0),
    ChannelDescriptor::new(4550.0, 4650.0, 33.0),
    ChannelDescriptor::new(4750.0, 4850.0, 30.0),
    ChannelDescriptor::new(4900.0, 5100.0, 27.0),
];

pub static CHANNEL_TABLE: ChannelTable = ChannelTable::from_static(&CHANNELS);
